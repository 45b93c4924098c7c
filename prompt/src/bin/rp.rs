// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Try out each prompt in your terminal, eg: `rp select --option red --option green`.
//!
//! For more information on how to use CLAP, here are some resources:
//! 1. [Tutorial](https://developerlife.com/2023/09/17/tuify-clap/)
//! 2. [Video](https://youtu.be/lzMYDA6St0s)

use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use r3bl_prompt::{AbortController, ConfirmOptions, ConfirmPrompt, InputDevice,
                  MultiSelectOptions, MultiSelectPrompt, PasswordOptions, PasswordPrompt,
                  PromptIo, PromptResult, SelectOption, SelectOptions, SelectPrompt,
                  Spinner, SpinnerOptions, SpinnerOutcome, SpinnerTemplate, TextOptions,
                  TextPrompt, TracingConfig, WriterConfig, try_initialize_logging_global,
                  validator};

#[derive(Debug, Parser)]
#[command(bin_name = "rp")]
#[command(about = "Interactive prompts for your terminal", long_about = None)]
#[command(version)]
#[command(next_line_help = true)]
#[command(arg_required_else_help(true))]
/// More info:
/// - <https://docs.rs/clap/latest/clap/_derive/#overview>
/// - <https://developerlife.com/2023/09/17/tuify-clap/>
pub struct CLIArg {
    #[command(subcommand)]
    pub command: CLICommand,

    #[command(flatten)]
    pub global_options: GlobalOption,
}

#[derive(Debug, Args)]
pub struct GlobalOption {
    #[arg(
        global = true,
        long,
        value_enum,
        default_value_t = LogLevel::Off,
        help = "Log to a file, since the prompts own the terminal"
    )]
    pub log_level: LogLevel,

    #[arg(global = true, long, default_value = "rp.log", help = "Log file path")]
    pub log_file: String,

    #[arg(
        global = true,
        long,
        value_name = "seconds",
        help = "Cancel the prompt if it is not answered in time"
    )]
    pub timeout: Option<u64>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for tracing_core::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => Self::OFF,
            LogLevel::Error => Self::ERROR,
            LogLevel::Warn => Self::WARN,
            LogLevel::Info => Self::INFO,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Trace => Self::TRACE,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CLICommand {
    #[clap(about = "Single line text input")]
    Text {
        #[arg(long, short = 'm', default_value = "What is your name?")]
        message: String,
        #[arg(long, short = 'p', help = "Shown when empty, Tab accepts it")]
        placeholder: Option<String>,
        #[arg(long, short = 'd', help = "Submitted when the input is left empty")]
        default_value: Option<String>,
        #[arg(long, help = "Reject an empty answer")]
        required: bool,
    },

    #[clap(about = "Masked text input")]
    Password {
        #[arg(long, short = 'm', default_value = "Password")]
        message: String,
    },

    #[clap(about = "Yes or no")]
    Confirm {
        #[arg(long, short = 'm', default_value = "Continue?")]
        message: String,
    },

    #[clap(about = "Pick one option")]
    Select {
        #[arg(long, short = 'm', default_value = "Pick one")]
        message: String,
        #[arg(long = "option", short = 'o', value_name = "label")]
        options: Vec<String>,
    },

    #[clap(about = "Pick any number of options")]
    MultiSelect {
        #[arg(long, short = 'm', default_value = "Pick some")]
        message: String,
        #[arg(long = "option", short = 'o', value_name = "label")]
        options: Vec<String>,
        #[arg(long, help = "Allow submitting an empty selection")]
        optional: bool,
    },

    #[clap(about = "Spin for a while. Ctrl+C exits")]
    Spinner {
        #[arg(long, short = 'm', default_value = "Working")]
        message: String,
        #[arg(long, short = 's', default_value_t = 3)]
        seconds: u64,
        #[arg(long, help = "Print dots instead of animating, like in CI")]
        ci: bool,
    },
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    // If no args are passed, the following line will fail, and help will be printed
    // thanks to `arg_required_else_help(true)` in the `CLIArg` struct.
    let cli_arg = CLIArg::parse();

    let tracing_config = TracingConfig {
        writer_config: WriterConfig::File(cli_arg.global_options.log_file.clone()),
        level_filter: cli_arg.global_options.log_level.into(),
    };
    try_initialize_logging_global(tracing_config)?;

    // % is Display, ? is Debug.
    tracing::debug!(message = "Start logging...", cli_arg = ?cli_arg);

    let io = make_io(cli_arg.global_options.timeout);
    let outcome = run(cli_arg.command, io).await?;
    println!("{outcome}");

    tracing::debug!(message = "Stop logging...", outcome = %outcome);
    Ok(())
}

/// Stdin / stdout. With a timeout, an [`AbortController`] cancels the prompt from a
/// background task.
fn make_io(timeout: Option<u64>) -> PromptIo {
    let abort_signal = timeout.map(|seconds| {
        let controller = AbortController::new();
        let abort_signal = controller.signal();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(seconds)).await;
            controller.abort();
        });
        abort_signal
    });

    PromptIo {
        abort_signal,
        ..Default::default()
    }
}

async fn run(command: CLICommand, io: PromptIo) -> miette::Result<String> {
    Ok(match command {
        CLICommand::Text {
            message,
            placeholder,
            default_value,
            required,
        } => {
            let validate = required.then(|| {
                validator(|value: Option<&String>| match value {
                    Some(value) if !value.trim().is_empty() => Ok(()),
                    _ => Err("A value is required".into()),
                })
            });
            let result = TextPrompt::new(TextOptions {
                message,
                placeholder,
                default_value,
                validate,
                io,
                ..Default::default()
            })
            .prompt()
            .await?;
            describe(result.map(|it| format!("{it:?}")))
        }

        CLICommand::Password { message } => {
            let result = PasswordPrompt::new(PasswordOptions {
                message,
                io,
                ..Default::default()
            })
            .prompt()
            .await?;
            describe(result.map(|it| format!("{} chars", it.chars().count())))
        }

        CLICommand::Confirm { message } => {
            let result = ConfirmPrompt::new(ConfirmOptions {
                message,
                io,
                ..Default::default()
            })
            .prompt()
            .await?;
            describe(result.map(|it| it.to_string()))
        }

        CLICommand::Select { message, options } => {
            let result = SelectPrompt::new(SelectOptions {
                message,
                options: options.into_iter().map(SelectOption::from).collect(),
                io,
                ..Default::default()
            })
            .prompt()
            .await?;
            describe(result)
        }

        CLICommand::MultiSelect {
            message,
            options,
            optional,
        } => {
            let result = MultiSelectPrompt::new(MultiSelectOptions {
                message,
                options: options.into_iter().map(SelectOption::from).collect(),
                required: !optional,
                io,
                ..Default::default()
            })
            .prompt()
            .await?;
            describe(result.map(|it| it.join(", ")))
        }

        CLICommand::Spinner {
            message,
            seconds,
            ci,
        } => {
            let mut spinner = Spinner::new(SpinnerOptions {
                template: SpinnerTemplate::Braille,
                ci: ci.then_some(true),
                input_device: Some(InputDevice::new_event_stream()),
                ..Default::default()
            });
            spinner.start(&message)?;
            for step in 1..=seconds {
                tokio::time::sleep(Duration::from_secs(1)).await;
                spinner.set_message(format!("{message} ({step}/{seconds})"));
            }
            spinner.stop("Done", SpinnerOutcome::Done).await?;
            "done".to_string()
        }
    })
}

fn describe(result: PromptResult<String>) -> String {
    match result {
        PromptResult::Submit(value) => format!("submitted: {value}"),
        PromptResult::Cancel => "cancelled".to_string(),
    }
}
