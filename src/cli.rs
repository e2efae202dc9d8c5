//! # CLI Module / 命令行模块
//!
//! Builds the localized command line, turns matches into typed arguments and
//! dispatches to the commands.
//!
//! 构建本地化的命令行，将匹配结果转换为类型化参数并分派给各命令。

use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::env;
use std::path::PathBuf;

use crate::core::config::InspectorConfig;
use crate::infra::t;

pub mod commands;

/// Arguments of `scan`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanArgs {
    /// Language code to scan; the system language when absent.
    pub lang_code: Option<String>,
    pub filter: Option<String>,
    pub jobs: Option<usize>,
    pub html: Option<PathBuf>,
    pub json: Option<PathBuf>,
    /// Enable template comparison regardless of the config file.
    pub templates: bool,
    pub template_dir: Option<PathBuf>,
}

/// Arguments of `inspect`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectArgs {
    pub file: PathBuf,
    pub template: Option<PathBuf>,
    pub show_entries: bool,
}

/// Arguments of `init`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitArgs {
    pub output: Option<PathBuf>,
    pub force: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    Scan(ScanArgs),
    Inspect(InspectArgs),
    Packs,
    Init(InitArgs),
}

/// The parsed command line.
/// 解析后的命令行。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    /// UI language in effect.
    pub language: String,
    /// `--lang` was given; the config file must not override it.
    pub language_explicit: bool,
    pub verbose: bool,
    pub config: Option<PathBuf>,
    pub command: CliCommand,
}

/// Pre-parses the command line arguments to find the language setting.
/// This allows i18n to be initialized before the full CLI is built.
///
/// 预解析命令行参数以查找语言设置，以便在构建完整 CLI 之前初始化国际化。
fn pre_parse_language(args: &[String]) -> Option<String> {
    args.iter().enumerate().find_map(|(pos, arg)| {
        if arg == "--lang" {
            args.get(pos + 1).cloned()
        } else {
            arg.strip_prefix("--lang=").map(str::to_string)
        }
    })
}

fn build_cli(locale: &str) -> Command {
    Command::new("langpack-inspector")
        .version(env!("CARGO_PKG_VERSION"))
        .about(t!("cli.about", locale = locale).to_string())
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("lang")
                .long("lang")
                .help(t!("cli.lang", locale = locale).to_string())
                .value_name("LANGUAGE")
                .global(true)
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help(t!("cli.config", locale = locale).to_string())
                .value_name("CONFIG")
                .global(true)
                .value_parser(clap::value_parser!(PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help(t!("cli.verbose", locale = locale).to_string())
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("scan")
                .about(t!("cli.scan.about", locale = locale).to_string())
                .arg(
                    Arg::new("lang-code")
                        .short('l')
                        .long("lang-code")
                        .help(t!("cli.scan.lang_code", locale = locale).to_string())
                        .value_name("CODE")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("filter")
                        .short('f')
                        .long("filter")
                        .help(t!("cli.scan.filter", locale = locale).to_string())
                        .value_name("TEXT")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("jobs")
                        .short('j')
                        .long("jobs")
                        .help(t!("cli.scan.jobs", locale = locale).to_string())
                        .value_name("JOBS")
                        .value_parser(clap::value_parser!(usize))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("html")
                        .long("html")
                        .help(t!("cli.scan.html", locale = locale).to_string())
                        .value_name("HTML")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help(t!("cli.scan.json", locale = locale).to_string())
                        .value_name("JSON")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("templates")
                        .long("templates")
                        .help(t!("cli.scan.templates", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("template-dir")
                        .long("template-dir")
                        .help(t!("cli.scan.template_dir", locale = locale).to_string())
                        .value_name("DIR")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about(t!("cli.inspect.about", locale = locale).to_string())
                .arg(
                    Arg::new("file")
                        .help(t!("cli.inspect.file", locale = locale).to_string())
                        .value_name("FILE")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("template")
                        .short('t')
                        .long("template")
                        .help(t!("cli.inspect.template", locale = locale).to_string())
                        .value_name("POT")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("show-entries")
                        .long("show-entries")
                        .help(t!("cli.inspect.show_entries", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("packs").about(t!("cli.packs.about", locale = locale).to_string()))
        .subcommand(
            Command::new("init")
                .about(t!("cli.init.about", locale = locale).to_string())
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .help(t!("cli.init.output", locale = locale).to_string())
                        .value_name("OUTPUT")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("force")
                        .long("force")
                        .help(t!("cli.init.force", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn command_from_matches(matches: &ArgMatches) -> Option<CliCommand> {
    let command = match matches.subcommand()? {
        ("scan", scan) => CliCommand::Scan(ScanArgs {
            lang_code: scan.get_one::<String>("lang-code").cloned(),
            filter: scan.get_one::<String>("filter").cloned(),
            jobs: scan.get_one::<usize>("jobs").copied(),
            html: scan.get_one::<PathBuf>("html").cloned(),
            json: scan.get_one::<PathBuf>("json").cloned(),
            templates: scan.get_flag("templates"),
            template_dir: scan.get_one::<PathBuf>("template-dir").cloned(),
        }),
        ("inspect", inspect) => CliCommand::Inspect(InspectArgs {
            file: inspect.get_one::<PathBuf>("file")?.clone(),
            template: inspect.get_one::<PathBuf>("template").cloned(),
            show_entries: inspect.get_flag("show-entries"),
        }),
        ("packs", _) => CliCommand::Packs,
        ("init", init) => CliCommand::Init(InitArgs {
            output: init.get_one::<PathBuf>("output").cloned(),
            force: init.get_flag("force"),
        }),
        _ => return None,
    };
    Some(command)
}

/// Parses `args` (program name first) without exiting the process.
///
/// # Errors
/// The clap error for invalid input, `--help` and `--version`.
///
/// 解析 `args`（第一个元素为程序名）而不退出进程。
pub fn try_parse_from(args: &[String]) -> Result<CliArgs, clap::Error> {
    let requested = pre_parse_language(args);
    let language = crate::resolve_ui_language(requested.as_deref());
    let mut cli = build_cli(&language);
    let matches = cli.try_get_matches_from_mut(args)?;
    let command = command_from_matches(&matches).ok_or_else(|| {
        cli.error(
            clap::error::ErrorKind::MissingSubcommand,
            t!("cli.missing_command", locale = &language).to_string(),
        )
    })?;

    Ok(CliArgs {
        language,
        language_explicit: requested.is_some(),
        verbose: matches.get_flag("verbose"),
        config: matches.get_one::<PathBuf>("config").cloned(),
        command,
    })
}

/// Parses the process arguments. Prints help or the error and exits on failure.
/// 解析进程参数。失败时打印帮助或错误并退出。
pub fn parse_args() -> CliArgs {
    let args: Vec<String> = env::args().collect();
    let args = match try_parse_from(&args) {
        Ok(args) => args,
        Err(error) => error.exit(),
    };
    rust_i18n::set_locale(&args.language);
    args
}

/// Loads the configuration and runs the chosen command.
///
/// `init` runs without reading the configuration, so a broken file can be
/// replaced.
///
/// 加载配置并运行所选命令。`init` 不读取配置，因此可以替换损坏的配置文件。
pub async fn process_command(args: CliArgs) -> Result<()> {
    if let CliCommand::Init(init) = &args.command {
        return commands::init::execute(init, &args.language);
    }

    let (config, loaded_from) = InspectorConfig::load(args.config.as_deref())?;
    let language = match (&config.language, args.language_explicit) {
        (Some(configured), false) => crate::init(Some(configured)),
        _ => args.language.clone(),
    };
    if let Some(path) = &loaded_from {
        tracing::debug!(path = %path.display(), %language, "configuration in effect");
    }

    match args.command {
        CliCommand::Scan(scan) => commands::scan::execute(scan, &config, &language).await,
        CliCommand::Inspect(inspect) => commands::inspect::execute(inspect, &config, &language).await,
        CliCommand::Packs => commands::packs::execute(&language).await,
        CliCommand::Init(_) => Ok(()),
    }
}
