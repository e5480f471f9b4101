#[cfg(test)]
mod tests {
    use crate::error::PipelineError;
    use crate::llm::tools::ToolKind;
    use crate::pipeline::persona::{
        Persona, data_scientist, process_analyst, quality_analyst, report_writer,
    };

    #[test]
    fn test_persona_construction() {
        let persona = Persona::new(
            "Quality Analyst",
            "Find quality issues",
            "Years of SPC experience.",
            vec![ToolKind::QualityAnalysis],
        )
        .unwrap();

        assert_eq!(persona.role, "Quality Analyst");
        assert!(persona.has_tools());
    }

    #[test]
    fn test_persona_rejects_empty_role() {
        let result = Persona::new("  ", "Find quality issues", "", vec![]);
        assert!(matches!(result, Err(PipelineError::Input(_))));
    }

    #[test]
    fn test_persona_rejects_empty_goal() {
        let result = Persona::new("Quality Analyst", "", "", vec![]);
        assert!(matches!(result, Err(PipelineError::Input(_))));
    }

    #[test]
    fn test_default_personas() {
        assert!(quality_analyst().unwrap().has_tools());
        assert!(process_analyst().unwrap().has_tools());
        assert_eq!(data_scientist().unwrap().tools.len(), 4);
        // 报告撰写人不使用工具
        assert!(!report_writer().unwrap().has_tools());
    }

    #[test]
    fn test_system_prompt_contains_role_goal_backstory() {
        let persona = quality_analyst().unwrap();
        let prompt = persona.system_prompt();

        assert!(prompt.contains("You are Quality Analyst."));
        assert!(prompt.contains(&persona.goal));
        assert!(prompt.contains(&persona.backstory));
    }
}
