#[cfg(test)]
mod tests {
    use crate::cli::Args;
    use crate::config::LLMProvider;
    use crate::i18n::TargetLanguage;
    use clap::Parser;
    use std::path::PathBuf;

    fn base_args() -> Vec<&'static str> {
        vec![
            "prodsight-rs",
            "-q", "quality.csv",
            "-p", "process.csv",
            "-f", "yield variance",
        ]
    }

    #[test]
    fn test_args_default_values() {
        let args = Args::try_parse_from(base_args()).unwrap();

        assert_eq!(args.quality_data, PathBuf::from("quality.csv"));
        assert_eq!(args.process_data, PathBuf::from("process.csv"));
        assert_eq!(args.focus, "yield variance");
        assert_eq!(args.output_path, PathBuf::from("./prodsight.report"));
        assert!(!args.verbose);
        assert!(!args.disable_preset_tools);
    }

    #[test]
    fn test_args_require_datasets_and_focus() {
        assert!(Args::try_parse_from(["prodsight-rs"]).is_err());
        assert!(Args::try_parse_from(["prodsight-rs", "-q", "quality.csv"]).is_err());
    }

    #[test]
    fn test_args_long_options() {
        let mut argv = base_args();
        argv.extend([
            "--output-path", "/tmp/report",
            "--disable-preset-tools",
            "--verbose",
        ]);
        let args = Args::try_parse_from(argv).unwrap();

        assert_eq!(args.output_path, PathBuf::from("/tmp/report"));
        assert!(args.disable_preset_tools);
        assert!(args.verbose);
    }

    #[test]
    fn test_args_llm_options() {
        let mut argv = base_args();
        argv.extend([
            "--llm-provider", "deepseek",
            "--llm-api-key", "test-key",
            "--llm-api-base-url", "https://api.deepseek.com",
            "--model-efficient", "deepseek-chat",
            "--model-powerful", "deepseek-reasoner",
            "--max-tokens", "2048",
            "--temperature", "0.7",
            "--max-iterations", "5",
        ]);
        let args = Args::try_parse_from(argv).unwrap();

        assert_eq!(args.llm_provider, Some("deepseek".to_string()));
        assert_eq!(args.llm_api_key, Some("test-key".to_string()));
        assert_eq!(args.llm_api_base_url, Some("https://api.deepseek.com".to_string()));
        assert_eq!(args.model_efficient, Some("deepseek-chat".to_string()));
        assert_eq!(args.model_powerful, Some("deepseek-reasoner".to_string()));
        assert_eq!(args.max_tokens, Some(2048));
        assert_eq!(args.temperature, Some(0.7));
        assert_eq!(args.max_iterations, Some(5));
    }

    #[test]
    fn test_into_config_basic() {
        let args = Args::try_parse_from(base_args()).unwrap();
        let config = args.into_config().unwrap();

        assert_eq!(config.quality_data_path, PathBuf::from("quality.csv"));
        assert_eq!(config.process_data_path, PathBuf::from("process.csv"));
        assert_eq!(config.analysis_focus, "yield variance");
        assert_eq!(config.output_path, PathBuf::from("./prodsight.report"));
        assert!(!config.verbose);
    }

    #[test]
    fn test_into_config_with_overrides() {
        let mut argv = base_args();
        argv.extend([
            "--llm-provider", "anthropic",
            "--llm-api-key", "test-key",
            "--model-efficient", "claude-3-5-haiku-latest",
            "--target-language", "zh",
            "--preview-rows", "5",
            "--temperature", "0.5",
        ]);
        let args = Args::try_parse_from(argv).unwrap();
        let config = args.into_config().unwrap();

        assert_eq!(config.llm.provider, LLMProvider::Anthropic);
        assert_eq!(config.llm.api_key, "test-key");
        assert_eq!(config.llm.model_efficient, "claude-3-5-haiku-latest");
        assert_eq!(config.target_language, TargetLanguage::Chinese);
        assert_eq!(config.preview_rows, 5);
        assert_eq!(config.llm.temperature, 0.5);
    }

    #[test]
    fn test_into_config_unknown_provider_keeps_default() {
        let mut argv = base_args();
        argv.extend(["--llm-provider", "not-a-provider"]);
        let args = Args::try_parse_from(argv).unwrap();
        let config = args.into_config().unwrap();

        assert_eq!(config.llm.provider, LLMProvider::OpenAI);
    }

    #[test]
    fn test_into_config_unknown_language_keeps_default() {
        let mut argv = base_args();
        argv.extend(["--target-language", "klingon"]);
        let args = Args::try_parse_from(argv).unwrap();
        let config = args.into_config().unwrap();

        assert_eq!(config.target_language, TargetLanguage::English);
    }

    #[test]
    fn test_into_config_missing_config_file_is_error() {
        let mut argv = base_args();
        argv.extend(["--config", "/nonexistent/prodsight.toml"]);
        let args = Args::try_parse_from(argv).unwrap();

        assert!(args.into_config().is_err());
    }
}
