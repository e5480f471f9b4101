#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rig::tool::Tool;
    use tokio::sync::RwLock;

    use crate::llm::tools::{
        AgentToolOutliers, AgentToolProcessMetrics, AgentToolQualityStats, AgentToolVisualization,
        ToolBindings, ToolKind, ToolRegistry, outliers::OutlierArgs,
        process_metrics::ProcessMetricsArgs, quality_stats::QualityStatsArgs,
        visualization::VisualizationArgs,
    };
    use crate::memory::ConversationState;
    use crate::types::Dataset;

    fn quality_dataset() -> Arc<Dataset> {
        let csv = "batch,yield,defects\nB001,95.2,3\nB002,97.1,1\nB003,96.4,2\nB004,88.0,9\n";
        Arc::new(Dataset::from_reader("quality", csv.as_bytes()).unwrap())
    }

    fn process_dataset() -> Arc<Dataset> {
        let csv = "efficiency,speed\n0.8,100\n0.9,120\n1.0,110\n";
        Arc::new(Dataset::from_reader("process", csv.as_bytes()).unwrap())
    }

    fn empty_dataset() -> Arc<Dataset> {
        Arc::new(Dataset::from_reader("quality", "a,b\n".as_bytes()).unwrap())
    }

    #[test]
    fn test_registry_lookup() {
        let registry = ToolRegistry::standard();

        assert_eq!(registry.descriptors().len(), 4);
        let descriptor = registry.descriptor("quality_data_analysis").unwrap();
        assert_eq!(descriptor.kind, ToolKind::QualityAnalysis);
        assert!(registry.descriptor("unknown_tool").is_none());
    }

    #[test]
    fn test_registry_list_for_preserves_order() {
        let registry = ToolRegistry::standard();
        let kinds = [ToolKind::OutlierDetection, ToolKind::QualityAnalysis];

        let listed = registry.list_for(&kinds);
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].name, "outlier_detection");
        assert_eq!(listed[1].name, "quality_data_analysis");
    }

    #[test]
    #[should_panic(expected = "duplicate tool name")]
    fn test_registry_rejects_duplicate_names() {
        let _ = ToolRegistry::from_kinds(&[ToolKind::QualityAnalysis, ToolKind::QualityAnalysis]);
    }

    #[tokio::test]
    async fn test_quality_stats_tool() {
        let tool = AgentToolQualityStats::new(quality_dataset());
        let result = tool.call(QualityStatsArgs {}).await.unwrap();

        assert!(result.summary.contains("Quality Data Analysis:"));
        assert!(result.summary.contains("yield"));
    }

    #[tokio::test]
    async fn test_quality_stats_tool_degrades_on_empty_dataset() {
        let tool = AgentToolQualityStats::new(empty_dataset());
        let result = tool.call(QualityStatsArgs {}).await.unwrap();

        assert!(result.summary.contains("incomplete"));
    }

    #[tokio::test]
    async fn test_process_metrics_tool() {
        let tool = AgentToolProcessMetrics::new(process_dataset());
        let result = tool.call(ProcessMetricsArgs {}).await.unwrap();

        assert!(result.summary.contains("Process Efficiency (mean): 0.9"));
    }

    #[tokio::test]
    async fn test_outlier_tool_selects_process_dataset() {
        let tool = AgentToolOutliers::new(quality_dataset(), process_dataset());
        let result = tool
            .call(OutlierArgs {
                dataset: Some("process".to_string()),
            })
            .await
            .unwrap();

        assert!(result.summary.contains("'process' data"));
        assert!(result.summary.contains("efficiency"));
    }

    #[tokio::test]
    async fn test_outlier_tool_unknown_selector_is_annotated() {
        let tool = AgentToolOutliers::new(quality_dataset(), process_dataset());
        let result = tool
            .call(OutlierArgs {
                dataset: Some("inventory".to_string()),
            })
            .await
            .unwrap();

        assert!(result.summary.contains("skipped"));
        assert!(result.summary.contains("inventory"));
    }

    #[tokio::test]
    async fn test_visualization_tool_stores_artifact() {
        let state = Arc::new(RwLock::new(ConversationState::new()));
        let tool =
            AgentToolVisualization::new(quality_dataset(), process_dataset(), state.clone());

        let result = tool
            .call(VisualizationArgs { dataset: None })
            .await
            .unwrap();

        assert!(result.summary.contains("quality_correlation_heatmap.png"));
        let state = state.read().await;
        let artifact = state.artifact("quality_correlation_heatmap.png").unwrap();
        assert_eq!(&artifact[..4], &[0x89, b'P', b'N', b'G']);
    }

    #[tokio::test]
    async fn test_bindings_default_to_quality_dataset() {
        let bindings = ToolBindings::new(
            quality_dataset(),
            process_dataset(),
            Arc::new(RwLock::new(ConversationState::new())),
        );
        let result = bindings
            .outliers
            .call(OutlierArgs { dataset: None })
            .await
            .unwrap();
        assert!(result.summary.contains("'quality' data"));
    }
}
