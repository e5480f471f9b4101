#[cfg(test)]
mod tests {
    use crate::types::Dataset;
    use crate::types::dataset::format_number;

    fn sample_csv() -> &'static str {
        "batch,yield,defects,operator\n\
         B001,95.2,3,alice\n\
         B002,97.1,1,bob\n\
         B003,96.4,2,alice\n\
         B004,88.0,9,carol\n"
    }

    #[test]
    fn test_from_reader_basic() {
        let dataset = Dataset::from_reader("quality", sample_csv().as_bytes()).unwrap();

        assert_eq!(dataset.name(), "quality");
        assert_eq!(dataset.row_count(), 4);
        assert_eq!(dataset.column_count(), 4);
        assert!(!dataset.is_empty());
    }

    #[test]
    fn test_numeric_inference() {
        let dataset = Dataset::from_reader("quality", sample_csv().as_bytes()).unwrap();

        // batch 列以字母开头，非数值
        assert!(!dataset.column("batch").unwrap().is_numeric());
        assert!(dataset.column("yield").unwrap().is_numeric());
        assert!(dataset.column("defects").unwrap().is_numeric());
        assert!(!dataset.column("operator").unwrap().is_numeric());

        let numeric = dataset.numeric_columns();
        assert_eq!(numeric.len(), 2);
        assert_eq!(numeric[0].name, "yield");
        assert_eq!(numeric[1].name, "defects");
    }

    #[test]
    fn test_missing_cells() {
        let csv = "a,b\n1,\n2,x\n,y\n";
        let dataset = Dataset::from_reader("quality", csv.as_bytes()).unwrap();

        assert_eq!(dataset.row_count(), 3);
        // a 列有缺失值但剩余单元格均为数值
        let a = dataset.column("a").unwrap();
        assert!(a.is_numeric());
        assert_eq!(a.numeric_values().unwrap(), vec![1.0, 2.0]);

        // b 列包含非数值内容
        assert!(!dataset.column("b").unwrap().is_numeric());
    }

    #[test]
    fn test_empty_dataset() {
        let csv = "a,b\n";
        let dataset = Dataset::from_reader("quality", csv.as_bytes()).unwrap();

        assert!(dataset.is_empty());
        assert_eq!(dataset.row_count(), 0);
        assert_eq!(dataset.column_count(), 2);
    }

    #[test]
    fn test_mixed_column_is_text() {
        let csv = "v\n1\ntwo\n3\n";
        let dataset = Dataset::from_reader("process", csv.as_bytes()).unwrap();
        assert!(!dataset.column("v").unwrap().is_numeric());
    }

    #[test]
    fn test_preview_markdown() {
        let dataset = Dataset::from_reader("quality", sample_csv().as_bytes()).unwrap();
        let preview = dataset.preview_markdown(2);

        assert!(preview.contains("| batch |"));
        assert!(preview.contains("| B001 |"));
        assert!(preview.contains("95.2"));
        assert!(!preview.contains("B003"));
        assert!(preview.contains("(2 of 4 rows shown)"));
    }

    #[test]
    fn test_preview_markdown_whole_dataset() {
        let dataset = Dataset::from_reader("quality", sample_csv().as_bytes()).unwrap();
        let preview = dataset.preview_markdown(100);

        assert!(preview.contains("B004"));
        assert!(!preview.contains("rows shown"));
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(95.2), "95.2");
        assert_eq!(format_number(1.23456789), "1.2346");
    }
}
