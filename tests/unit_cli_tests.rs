//! # CLI Unit Tests / CLI 单元测试
//!
//! Tests for argument parsing, UI language selection and the scan
//! command's template settings.
//!
//! 参数解析、界面语言选择以及扫描命令模板设置的测试。

use langpack_inspector::cli::commands::scan::effective_template_config;
use langpack_inspector::cli::{CliCommand, InitArgs, ScanArgs, try_parse_from};
use langpack_inspector::core::config::TemplateConfig;
use langpack_inspector::resolve_ui_language;
use std::path::PathBuf;

fn args(items: &[&str]) -> Vec<String> {
    std::iter::once("langpack-inspector")
        .chain(items.iter().copied())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod language_tests {
    use super::*;

    #[test]
    fn test_resolve_ui_language() {
        assert_eq!(resolve_ui_language(Some("sv")), "sv");
        assert_eq!(resolve_ui_language(Some("sv_SE.UTF-8")), "sv");
        assert_eq!(resolve_ui_language(Some("zh_CN")), "zh-CN");
        assert_eq!(resolve_ui_language(Some("ZH-cn")), "zh-CN");
        assert_eq!(resolve_ui_language(Some("tlh")), "en");
    }

    #[test]
    fn test_lang_flag_forms() {
        let parsed = try_parse_from(&args(&["--lang", "sv", "packs"])).unwrap();
        assert_eq!(parsed.language, "sv");
        assert!(parsed.language_explicit);

        let parsed = try_parse_from(&args(&["packs", "--lang=zh_CN"])).unwrap();
        assert_eq!(parsed.language, "zh-CN");
    }

    #[test]
    fn test_language_not_explicit_without_flag() {
        let parsed = try_parse_from(&args(&["packs"])).unwrap();
        assert!(!parsed.language_explicit);
    }
}

#[cfg(test)]
mod parse_tests {
    use super::*;

    #[test]
    fn test_scan_arguments() {
        let parsed = try_parse_from(&args(&[
            "-v",
            "--config",
            "custom.toml",
            "scan",
            "-l",
            "sv",
            "--filter",
            "gnome",
            "-j",
            "8",
            "--html",
            "report.html",
            "--template-dir",
            "pots",
        ]))
        .unwrap();

        assert!(parsed.verbose);
        assert_eq!(parsed.config, Some(PathBuf::from("custom.toml")));
        assert_eq!(
            parsed.command,
            CliCommand::Scan(ScanArgs {
                lang_code: Some("sv".to_string()),
                filter: Some("gnome".to_string()),
                jobs: Some(8),
                html: Some(PathBuf::from("report.html")),
                json: None,
                templates: false,
                template_dir: Some(PathBuf::from("pots")),
            })
        );
    }

    #[test]
    fn test_inspect_arguments() {
        let parsed =
            try_parse_from(&args(&["inspect", "gedit.mo", "-t", "gedit.pot", "--show-entries"])).unwrap();

        match parsed.command {
            CliCommand::Inspect(inspect) => {
                assert_eq!(inspect.file, PathBuf::from("gedit.mo"));
                assert_eq!(inspect.template, Some(PathBuf::from("gedit.pot")));
                assert!(inspect.show_entries);
            }
            other => panic!("expected inspect, got {:?}", other),
        }
    }

    #[test]
    fn test_init_arguments() {
        let parsed = try_parse_from(&args(&["init", "-o", "out.toml", "--force"])).unwrap();
        assert_eq!(
            parsed.command,
            CliCommand::Init(InitArgs {
                output: Some(PathBuf::from("out.toml")),
                force: true,
            })
        );
    }

    #[test]
    fn test_invalid_input() {
        assert!(try_parse_from(&args(&[])).is_err());
        assert!(try_parse_from(&args(&["inspect"])).is_err());
        assert!(try_parse_from(&args(&["scan", "--jobs", "many"])).is_err());
        assert!(try_parse_from(&args(&["frobnicate"])).is_err());
    }
}

#[cfg(test)]
mod template_settings_tests {
    use super::*;

    #[test]
    fn test_config_used_as_is() {
        let config = TemplateConfig::default();
        assert_eq!(effective_template_config(&ScanArgs::default(), &config), config);
    }

    #[test]
    fn test_flag_enables_templates() {
        let scan = ScanArgs {
            templates: true,
            ..ScanArgs::default()
        };
        let effective = effective_template_config(&scan, &TemplateConfig::default());
        assert!(effective.enabled);
        assert_eq!(effective.directory, None);
    }

    #[test]
    fn test_directory_flag_enables_and_overrides() {
        let config = TemplateConfig {
            directory: Some(PathBuf::from("/etc/pots")),
            ..TemplateConfig::default()
        };
        let scan = ScanArgs {
            template_dir: Some(PathBuf::from("pots")),
            ..ScanArgs::default()
        };
        let effective = effective_template_config(&scan, &config);
        assert!(effective.enabled);
        assert_eq!(effective.directory, Some(PathBuf::from("pots")));
    }
}
