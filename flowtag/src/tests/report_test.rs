#[cfg(test)]
mod tests {
    use std::fs;

    use crate::args::ExportMethodType;
    use crate::error::FlowTagError;
    use crate::flow_counts::{FlowCounts, UNTAGGED};
    use crate::lookup::{LookupKey, LookupTable};
    use crate::report::{render_report, write_report, ReportWriter};
    use crate::tests::fixtures::{TestDir, EXPECTED_REPORT, FLOW_LOGS, LOOKUP_CSV};

    fn setup_counts() -> FlowCounts {
        let lookup = LookupTable::from_reader(LOOKUP_CSV.as_bytes()).unwrap();
        FlowCounts::from_reader(FLOW_LOGS.as_bytes(), &lookup).unwrap()
    }

    #[test]
    fn test_report_layout() {
        assert_eq!(render_report(&setup_counts()).unwrap(), EXPECTED_REPORT);
    }

    #[test]
    fn test_empty_report() {
        assert_eq!(
            render_report(&FlowCounts::new()).unwrap(),
            "Tag Counts:\nTag,Count\nPort/Protocol Combinations Counts:\nPort,Protocol,Count\n"
        );
    }

    #[test]
    fn test_untagged_omitted_when_absent() {
        let mut counts = FlowCounts::new();
        counts.increment("web", &LookupKey::new("80", "tcp"));

        let report = render_report(&counts).unwrap();
        assert!(!report.contains(UNTAGGED));
        assert_eq!(
            report,
            "Tag Counts:\nTag,Count\nweb,1\nPort/Protocol Combinations Counts:\nPort,Protocol,Count\n80,tcp,1\n"
        );
    }

    #[test]
    fn test_untagged_written_last() {
        let mut counts = FlowCounts::new();
        counts.increment("zeta", &LookupKey::new("1", "tcp"));
        counts.increment(UNTAGGED, &LookupKey::new("2", "tcp"));
        counts.increment(UNTAGGED, &LookupKey::new("2", "tcp"));
        counts.increment("Alpha", &LookupKey::new("3", "tcp"));
        counts.increment("alpha", &LookupKey::new("3", "tcp"));

        let report = render_report(&counts).unwrap();
        let tag_lines: Vec<&str> = report.lines().skip(2).take(4).collect();
        assert_eq!(tag_lines, vec!["Alpha,1", "alpha,1", "zeta,1", "Untagged,2"]);
    }

    #[test]
    fn test_port_protocol_sorted_as_strings() {
        let mut counts = FlowCounts::new();
        for (port, protocol) in [
            ("443", "tcp"),
            ("25", "tcp"),
            ("110", "udp"),
            ("110", "tcp"),
            ("1024", "tcp"),
            ("25", "tcp"),
        ] {
            counts.increment(UNTAGGED, &LookupKey::new(port, protocol));
        }

        let report = render_report(&counts).unwrap();
        let pair_lines: Vec<&str> = report
            .lines()
            .skip_while(|line| *line != "Port,Protocol,Count")
            .skip(1)
            .collect();
        assert_eq!(
            pair_lines,
            vec!["1024,tcp,1", "110,tcp,1", "110,udp,1", "25,tcp,2", "443,tcp,1"]
        );
    }

    #[test]
    fn test_write_report_overwrites_existing_file() {
        let dir = TestDir::new("report-overwrite");
        let path = dir.write("output.txt", "stale contents that are much longer than nothing\n");

        write_report(&path, &setup_counts()).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), EXPECTED_REPORT);
    }

    #[test]
    fn test_report_writer_to_file() {
        let dir = TestDir::new("report-writer");
        let path = dir.path("output.txt");

        let mut writer = ReportWriter::to_file(&path).unwrap();
        writer.write(&setup_counts()).unwrap();
        writer.flush_and_close().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), EXPECTED_REPORT);
    }

    #[test]
    fn test_report_writer_export_method() {
        let dir = TestDir::new("report-export-method");
        let path = dir.path("output.txt");

        let mut writer = ReportWriter::new(ExportMethodType::File, &path).unwrap();
        writer.write(&setup_counts()).unwrap();
        writer.flush_and_close().unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), EXPECTED_REPORT);

        let printed_path = dir.path("printed.txt");
        let mut writer = ReportWriter::new(ExportMethodType::Print, &printed_path).unwrap();
        writer.write(&setup_counts()).unwrap();
        writer.flush_and_close().unwrap();
        assert!(!printed_path.exists());
    }

    #[test]
    fn test_unwritable_output_is_file_access_error() {
        let dir = TestDir::new("report-unwritable");
        let path = dir.root().join("missing_dir").join("output.txt");

        let result = write_report(&path, &setup_counts());
        assert!(matches!(result, Err(FlowTagError::FileAccess { .. })));
    }
}
