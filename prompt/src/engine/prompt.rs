// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt::{Debug, Formatter},
          sync::Arc};

use crossterm::{cursor::Show, style::Print};

use crate::{AbortSignal, Action, AliasRegistry, DEVELOPMENT_MODE, EventEmitter,
            FrameBuffer, InputDevice, InputEvent, KeyPress, LineEditResult, OutputDevice,
            PromptCore, PromptError, PromptEvent, PromptEventKind, PromptResult,
            PromptState, RawModeGuard, Size, SpecialKey, SubscriptionId,
            UnicodeWidthStrategy, Validator, WidthStrategy, apply_to_buffer,
            execute_commands};

/// Projects the prompt's current state into the frame to display. Lines are separated
/// by `\n`. It must not panic, since raw mode may be on while it runs.
pub type RenderFn<V, X> = Box<dyn Fn(&PromptCore<V, X>) -> String + Send + Sync>;

/// Box a closure as a [`RenderFn`], letting the compiler infer the argument type.
pub fn render_fn<V, X>(
    render: impl Fn(&PromptCore<V, X>) -> String + Send + Sync + 'static,
) -> RenderFn<V, X> {
    Box::new(render)
}

/// Everything needed to build a [`Prompt`].
///
/// ```
/// use r3bl_prompt::*;
///
/// let options: PromptOptions<String> = PromptOptions {
///     render: render_fn(|core| format!("name: {}", core.user_input)),
///     placeholder: Some("anonymous".into()),
///     ..Default::default()
/// };
/// assert!(options.track_value);
/// ```
#[allow(missing_debug_implementations)]
pub struct PromptOptions<V, X = ()> {
    pub render: RenderFn<V, X>,
    pub initial_value: Option<V>,
    /// Seeds the text buffer of a tracked prompt. The cursor starts at its end.
    pub initial_user_input: Option<String>,
    pub validate: Option<Validator<V>>,
    /// Tab fills an empty text buffer with this.
    pub placeholder: Option<String>,
    /// Text prompts keep this on, and the prompt edits `user_input` for them. Selection
    /// prompts turn it off and handle [`PromptEvent::Cursor`] themselves.
    pub track_value: bool,
    /// [`AliasRegistry::global()`] when `None`.
    pub aliases: Option<AliasRegistry>,
    pub width_strategy: Arc<dyn WidthStrategy>,
    pub output_device: OutputDevice,
    /// Stdin's event stream when `None`.
    pub input_device: Option<InputDevice>,
    pub abort_signal: Option<AbortSignal>,
    pub ext: X,
}

impl<V, X: Default> Default for PromptOptions<V, X> {
    fn default() -> Self {
        Self {
            render: Box::new(|_| String::new()),
            initial_value: None,
            initial_user_input: None,
            validate: None,
            placeholder: None,
            track_value: true,
            aliases: None,
            width_strategy: Arc::new(UnicodeWidthStrategy),
            output_device: OutputDevice::default(),
            input_device: None,
            abort_signal: None,
            ext: X::default(),
        }
    }
}

/// The lifecycle that every prompt subtype shares. A subtype supplies a render function
/// and an `ext` payload, and reacts to [`PromptEvent`]s via [`Self::on()`] /
/// [`Self::once()`].
///
/// For each keypress, in this order:
/// 1. Nothing happens once the state is [`PromptState::Submit`] or
///    [`PromptState::Cancel`].
/// 2. [`PromptState::Error`] goes back to [`PromptState::Active`], clearing the error.
/// 3. Tracked prompts run the line editor, emitting [`PromptEvent::Value`] if the text
///    changed.
/// 4. An alias emits [`PromptEvent::Cursor`], for untracked prompts only, so that
///    typing `j` in a text field doesn't move anything.
/// 5. Arrow keys and space emit [`PromptEvent::Cursor`] in every prompt.
/// 6. `y` / `n` emit [`PromptEvent::Confirm`].
/// 7. Tab with a placeholder and an empty buffer fills the buffer, emitting
///    [`PromptEvent::Value`].
/// 8. A printable character emits [`PromptEvent::Key`], lower cased.
/// 9. Enter validates the value. Failure moves to [`PromptState::Error`], success to
///    [`PromptState::Submit`].
/// 10. The cancel alias moves to [`PromptState::Cancel`], skipping validation.
/// 11. On submit or cancel, [`PromptEvent::Finalize`] is emitted.
/// 12. The frame is rendered, via the diffing [`FrameBuffer`].
/// 13. On submit or cancel the prompt is torn down: raw mode is restored, a newline
///     is written, the cursor is shown, [`PromptEvent::Submit`] or
///     [`PromptEvent::Cancel`] is emitted, and every subscription is cleared.
pub struct Prompt<V, X = ()> {
    core: PromptCore<V, X>,
    emitter: EventEmitter<PromptEvent, PromptCore<V, X>>,
    render: RenderFn<V, X>,
    validate: Option<Validator<V>>,
    placeholder: Option<String>,
    track_value: bool,
    aliases: AliasRegistry,
    frame_buffer: FrameBuffer,
    output_device: OutputDevice,
    input_device: Option<InputDevice>,
    abort_signal: Option<AbortSignal>,
    raw_mode_guard: Option<RawModeGuard>,
    size: Size,
}

impl<V: Debug, X: Debug> Debug for Prompt<V, X> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Prompt")
            .field("core", &self.core)
            .field("emitter", &self.emitter)
            .field("track_value", &self.track_value)
            .field("frame_buffer", &self.frame_buffer)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

impl<V, X> Prompt<V, X> {
    #[must_use]
    pub fn new(options: PromptOptions<V, X>) -> Self {
        let PromptOptions {
            render,
            initial_value,
            initial_user_input,
            validate,
            placeholder,
            track_value,
            aliases,
            width_strategy,
            output_device,
            input_device,
            abort_signal,
            ext,
        } = options;

        let size = output_device.get_size();

        Self {
            core: PromptCore::new(initial_value, initial_user_input.unwrap_or_default(), ext),
            emitter: EventEmitter::new(),
            render,
            validate,
            placeholder,
            track_value,
            aliases: aliases.unwrap_or_else(AliasRegistry::global),
            frame_buffer: FrameBuffer::new(width_strategy),
            output_device,
            input_device: Some(input_device.unwrap_or_else(InputDevice::new_event_stream)),
            abort_signal,
            raw_mode_guard: None,
            size,
        }
    }

    pub fn on(
        &mut self,
        kind: PromptEventKind,
        handler: impl FnMut(&PromptEvent, &mut PromptCore<V, X>) + Send + 'static,
    ) -> SubscriptionId {
        self.emitter.on(kind, handler)
    }

    pub fn once(
        &mut self,
        kind: PromptEventKind,
        handler: impl FnMut(&PromptEvent, &mut PromptCore<V, X>) + Send + 'static,
    ) -> SubscriptionId {
        self.emitter.once(kind, handler)
    }

    pub fn off(&mut self, id: SubscriptionId) -> bool { self.emitter.off(id) }

    #[must_use]
    pub fn core(&self) -> &PromptCore<V, X> { &self.core }

    /// For subtypes to set up the starting cursor or `ext` before [`Self::prompt()`].
    /// Once running, state only changes in keypress handling and event handlers.
    pub fn core_mut(&mut self) -> &mut PromptCore<V, X> { &mut self.core }

    #[must_use]
    pub fn state(&self) -> PromptState { self.core.state }

    #[must_use]
    pub fn emitter(&self) -> &EventEmitter<PromptEvent, PromptCore<V, X>> {
        &self.emitter
    }

    /// The frame on screen, as wrapped at the current width.
    #[must_use]
    pub fn last_frame(&self) -> Option<&str> { self.frame_buffer.previous_frame() }

    /// Run one keypress through the lifecycle. See [`Prompt`] for the steps.
    ///
    /// # Errors
    ///
    /// Returns an error if the frame can't be written, or raw mode can't be restored.
    pub fn handle_keypress(&mut self, key_press: KeyPress) -> miette::Result<()> {
        if self.core.state.is_terminal() {
            return Ok(());
        }

        DEVELOPMENT_MODE.then(|| {
            // % is Display, ? is Debug.
            tracing::debug!(message = "Prompt::handle_keypress", ?key_press, state = %self.core.state);
        });

        if self.core.state == PromptState::Error {
            self.core.error.clear();
            self.set_state(PromptState::Active);
        }

        if self.track_value
            && apply_to_buffer(&mut self.core.user_input, &mut self.core.cursor, &key_press)
                == LineEditResult::Changed
        {
            let user_input = self.core.user_input.clone();
            self.emit(&PromptEvent::Value(user_input));
        }

        if !self.track_value
            && let Some(action) = self.aliases.resolve(&key_press)
        {
            self.emit(&PromptEvent::Cursor(action));
        }

        if let Some(action) = Action::from_direct_key(&key_press) {
            self.emit(&PromptEvent::Cursor(action));
        }

        let maybe_char = key_press.printable_char();

        match maybe_char.map(|it| it.to_ascii_lowercase()) {
            Some('y') => self.emit(&PromptEvent::Confirm(true)),
            Some('n') => self.emit(&PromptEvent::Confirm(false)),
            _ => {}
        }

        if key_press.is_special(SpecialKey::Tab)
            && self.core.user_input.is_empty()
            && let Some(placeholder) = self.placeholder.clone()
        {
            self.core.cursor = placeholder.chars().count();
            self.core.user_input.clone_from(&placeholder);
            self.emit(&PromptEvent::Value(placeholder));
        }

        if let Some(character) = maybe_char {
            let lower_case = character.to_lowercase().next().unwrap_or(character);
            self.emit(&PromptEvent::Key(lower_case));
        }

        if key_press.is_special(SpecialKey::Enter) {
            self.submit_or_reject();
        }

        if self.aliases.is_alias_for(&[key_press], Action::Cancel) {
            self.set_state(PromptState::Cancel);
        }

        self.finish_step()
    }

    /// Re-render at the new size, via the same diff path as a keypress.
    ///
    /// # Errors
    ///
    /// Returns an error if the frame can't be written.
    pub fn handle_resize(&mut self, size: Size) -> miette::Result<()> {
        self.size = size;
        if self.core.state.is_terminal() {
            return Ok(());
        }
        self.render_frame()
    }

    /// Cancel from outside, eg: when the [`AbortSignal`] fires. Tears down just like
    /// the cancel key. No-op once the prompt is finished.
    ///
    /// # Errors
    ///
    /// Returns an error if the frame can't be written, or raw mode can't be restored.
    pub fn abort(&mut self) -> miette::Result<()> {
        if self.core.state.is_terminal() {
            return Ok(());
        }
        self.set_state(PromptState::Cancel);
        self.finish_step()
    }

    fn submit_or_reject(&mut self) {
        let maybe_rejection = self
            .validate
            .as_ref()
            .and_then(|validate| validate(self.core.value.as_ref()).err());

        match maybe_rejection {
            Some(error) => {
                self.core.error = error.message().to_owned();
                self.set_state(PromptState::Error);
            }
            None => self.set_state(PromptState::Submit),
        }
    }

    /// Steps 11 to 13.
    fn finish_step(&mut self) -> miette::Result<()> {
        if self.core.state.is_terminal() {
            self.emit(&PromptEvent::Finalize);
        }

        self.render_frame()?;

        if self.core.state.is_terminal() {
            self.teardown()?;
        }
        Ok(())
    }

    fn render_frame(&mut self) -> miette::Result<()> {
        let frame = (self.render)(&self.core);
        let outcome = {
            let mut guard = self.output_device.lock();
            self.frame_buffer.render(&frame, &mut *guard, self.size)?
        };

        DEVELOPMENT_MODE.then(|| {
            // % is Display, ? is Debug.
            tracing::debug!(message = "Prompt::render_frame", ?outcome, state = %self.core.state);
        });

        if self.core.state == PromptState::Initial {
            self.set_state(PromptState::Active);
        }
        Ok(())
    }

    fn teardown(&mut self) -> miette::Result<()> {
        let raw_mode_result = match self.raw_mode_guard.take() {
            Some(mut raw_mode_guard) => raw_mode_guard.restore(),
            None => Ok(()),
        };

        execute_commands!(self.output_device, Print("\n"), Show);

        let event = match self.core.state {
            PromptState::Cancel => PromptEvent::Cancel,
            _ => PromptEvent::Submit,
        };
        self.emit(&event);
        self.emitter.clear();

        tracing::debug!(message = "Prompt torn down", state = %self.core.state);
        raw_mode_result
    }

    fn set_state(&mut self, state: PromptState) {
        if self.core.state == state {
            return;
        }
        tracing::debug!(message = "Prompt state", from = %self.core.state, to = %state);
        self.core.state = state;
    }

    fn emit(&mut self, event: &PromptEvent) {
        self.emitter.emit(event, &mut self.core);
    }
}

impl<V: Clone, X> Prompt<V, X> {
    /// Render, then process input until the prompt is submitted or cancelled.
    ///
    /// - Resolves [`PromptResult::Cancel`] on the cancel key, when the [`AbortSignal`]
    ///   fires, or when the input stream ends.
    /// - If the signal has already fired, resolves [`PromptResult::Cancel`] right away,
    ///   without rendering.
    ///
    /// # Errors
    ///
    /// - [`PromptError::AlreadyFinished`] if the prompt was already submitted or
    ///   cancelled.
    /// - [`PromptError::NoInputDevice`] if a previous call failed part way.
    /// - Raw mode can't be toggled, or the output can't be written.
    pub async fn prompt(&mut self) -> miette::Result<PromptResult<Option<V>>> {
        if self.core.state.is_terminal() {
            return Err(PromptError::AlreadyFinished {
                state: self.core.state,
            }
            .into());
        }

        if let Some(abort_signal) = self.abort_signal.as_ref()
            && abort_signal.is_aborted()
        {
            self.set_state(PromptState::Cancel);
            self.emitter.clear();
            return Ok(PromptResult::Cancel);
        }

        let mut input_device = self.input_device.take().ok_or(PromptError::NoInputDevice)?;

        self.raw_mode_guard = Some(RawModeGuard::enable(input_device.is_tty)?);
        self.render_frame()?;

        let maybe_abort_signal = self.abort_signal.clone();
        let aborted = async move {
            match maybe_abort_signal {
                Some(abort_signal) => abort_signal.aborted().await,
                None => std::future::pending::<()>().await,
            }
        };
        tokio::pin!(aborted);

        while !self.core.state.is_terminal() {
            tokio::select! {
                biased;

                () = &mut aborted => {
                    tracing::debug!(message = "Prompt aborted");
                    self.abort()?;
                }

                maybe_input_event = input_device.next_input_event() => {
                    match maybe_input_event {
                        Some(InputEvent::Keyboard(key_press)) => {
                            self.handle_keypress(key_press)?;
                        }
                        Some(InputEvent::Resize(size)) => self.handle_resize(size)?,
                        None => {
                            tracing::warn!(message = "Input stream ended, cancelling prompt");
                            self.abort()?;
                        }
                    }
                }
            }
        }

        Ok(self.result())
    }

    fn result(&self) -> PromptResult<Option<V>> {
        match self.core.state {
            PromptState::Cancel => PromptResult::Cancel,
            _ => PromptResult::Submit(self.core.value.clone()),
        }
    }
}
