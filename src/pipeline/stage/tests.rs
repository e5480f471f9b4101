#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use crate::error::PipelineError;
    use crate::llm::client::ModelTier;
    use crate::pipeline::persona;
    use crate::pipeline::stage::{StageSpec, build_stage, resolve_template};

    fn substitutions() -> HashMap<&'static str, String> {
        HashMap::from([
            ("analysis_focus", "yield variance".to_string()),
            ("quality_data_preview", "| yield |\n| 95.2 |".to_string()),
        ])
    }

    #[test]
    fn test_resolve_template_basic() {
        let resolved = resolve_template(
            "Analyze the data focusing on {analysis_focus}.",
            &substitutions(),
        )
        .unwrap();
        assert_eq!(resolved, "Analyze the data focusing on yield variance.");
    }

    #[test]
    fn test_resolve_template_multiple_placeholders() {
        let resolved = resolve_template(
            "{analysis_focus}: preview\n{quality_data_preview}",
            &substitutions(),
        )
        .unwrap();
        assert!(resolved.starts_with("yield variance: preview"));
        assert!(resolved.contains("| 95.2 |"));
    }

    #[test]
    fn test_resolve_template_missing_placeholder() {
        let result = resolve_template("data: {process_data_preview}", &substitutions());

        match result {
            Err(PipelineError::Input(message)) => {
                assert!(message.contains("process_data_preview"));
            }
            other => panic!("expected input error, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_template_is_idempotent() {
        let subs = substitutions();
        let template = "focus {analysis_focus} end";
        assert_eq!(
            resolve_template(template, &subs).unwrap(),
            resolve_template(template, &subs).unwrap()
        );
    }

    #[test]
    fn test_resolve_template_keeps_literal_braces() {
        let resolved = resolve_template("json like {\"a\": 1} stays", &substitutions()).unwrap();
        assert_eq!(resolved, "json like {\"a\": 1} stays");
    }

    #[test]
    fn test_build_stage() {
        let persona = Arc::new(persona::quality_analyst().unwrap());
        let spec = StageSpec {
            name: "quality_analysis",
            instruction_template: "Focus on {analysis_focus}.",
            expected_output: "A summary.",
            model_tier: ModelTier::Efficient,
        };

        let stage = build_stage(&spec, persona, &substitutions()).unwrap();
        assert_eq!(stage.name, "quality_analysis");
        assert_eq!(stage.instruction, "Focus on yield variance.");
        assert_eq!(stage.persona.role, "Quality Analyst");
    }

    #[test]
    fn test_build_stage_fails_on_missing_placeholder() {
        let persona = Arc::new(persona::report_writer().unwrap());
        let spec = StageSpec {
            name: "final_report",
            instruction_template: "Use {missing_input}.",
            expected_output: "",
            model_tier: ModelTier::Powerful,
        };

        assert!(build_stage(&spec, persona, &substitutions()).is_err());
    }
}
