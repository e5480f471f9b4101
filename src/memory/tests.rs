#[cfg(test)]
mod tests {
    use crate::memory::{ConversationState, StageRecord};
    use chrono::Utc;

    fn record(stage: &str, output: &str) -> StageRecord {
        StageRecord {
            stage: stage.to_string(),
            persona_role: "Quality Analyst".to_string(),
            output: output.to_string(),
            completed_at: Utc::now(),
            duration_ms: 10,
        }
    }

    #[test]
    fn test_append_and_read_order() {
        let mut state = ConversationState::new();
        state.append(record("quality_analysis", "first"));
        state.append(record("process_analysis", "second"));

        let transcript = state.transcript();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[0].stage, "quality_analysis");
        assert_eq!(transcript[1].stage, "process_analysis");
        assert_eq!(state.last_output(), Some("second"));
    }

    #[test]
    fn test_render_prior_findings() {
        let mut state = ConversationState::new();
        assert!(state.render_prior_findings().is_none());

        state.append(record("quality_analysis", "yield is stable"));
        let rendered = state.render_prior_findings().unwrap();
        assert!(rendered.contains("### quality_analysis (Quality Analyst)"));
        assert!(rendered.contains("yield is stable"));
    }

    #[test]
    fn test_artifacts() {
        let mut state = ConversationState::new();
        assert!(state.artifact("correlation_heatmap.png").is_none());

        state.store_artifact("correlation_heatmap.png", vec![1, 2, 3]);
        assert_eq!(
            state.artifact("correlation_heatmap.png"),
            Some(&[1u8, 2, 3][..])
        );

        // 同名覆盖
        state.store_artifact("correlation_heatmap.png", vec![9]);
        assert_eq!(state.artifact("correlation_heatmap.png"), Some(&[9u8][..]));
        assert_eq!(state.artifacts().count(), 1);
    }
}
