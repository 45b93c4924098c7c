// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::sync::Arc;

use crate::{AbortSignal, AliasRegistry, InputDevice, OutputDevice, PromptOptions,
            RenderFn, StyleSheet, UnicodeWidthStrategy, WidthStrategy};

/// The part of the options that is the same for every prompt subtype: where to read
/// and write, how to cancel from outside, and how it looks. `Default` is stdin /
/// stdout with the global [`AliasRegistry`].
#[allow(missing_debug_implementations)]
pub struct PromptIo {
    pub output_device: OutputDevice,
    pub input_device: Option<InputDevice>,
    pub abort_signal: Option<AbortSignal>,
    pub aliases: Option<AliasRegistry>,
    pub width_strategy: Arc<dyn WidthStrategy>,
    pub style: StyleSheet,
}

impl Default for PromptIo {
    fn default() -> Self {
        Self {
            output_device: OutputDevice::default(),
            input_device: None,
            abort_signal: None,
            aliases: None,
            width_strategy: Arc::new(UnicodeWidthStrategy),
            style: StyleSheet::default(),
        }
    }
}

impl PromptIo {
    /// Start the [`PromptOptions`] of a subtype. `style` is not used here, subtypes
    /// copy it into their `ext` first.
    pub(crate) fn into_prompt_options<V, X>(
        self,
        render: RenderFn<V, X>,
        ext: X,
    ) -> PromptOptions<V, X> {
        PromptOptions {
            render,
            initial_value: None,
            initial_user_input: None,
            validate: None,
            placeholder: None,
            track_value: true,
            aliases: self.aliases,
            width_strategy: self.width_strategy,
            output_device: self.output_device,
            input_device: self.input_device,
            abort_signal: self.abort_signal,
            ext,
        }
    }
}
