// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::sync::Arc;

use crate::{OutputDevice, Size, StdMutex, StdoutMock};

pub trait OutputDeviceExt {
    fn new_mock() -> (OutputDevice, StdoutMock);

    fn new_mock_with_size(size: Size) -> (OutputDevice, StdoutMock) {
        let (device, stdout_mock) = Self::new_mock();
        (device.with_size(size), stdout_mock)
    }
}

impl OutputDeviceExt for OutputDevice {
    fn new_mock() -> (OutputDevice, StdoutMock) {
        let stdout_mock = StdoutMock::default();
        let this = OutputDevice {
            resource: Arc::new(StdMutex::new(stdout_mock.clone())),
            is_mock: true,
            size_override: None,
        };
        (this, stdout_mock)
    }
}
