//! Tests for reading and writing workflow files.
mod common;
use careflow::prelude::*;
use careflow::transfer::{import_from_str, write_export};
use common::*;

#[test]
fn test_export_empty_workflow_is_rejected() {
    for format in [ExportFormat::Json, ExportFormat::Csv] {
        let err = export_to_file(&[], format, "empty").unwrap_err();
        assert_eq!(err, ExportError::EmptyWorkflow);
    }
}

#[test]
fn test_csv_export_matches_expected_text() {
    let file = export_to_file(&[reception_node()], ExportFormat::Csv, "recepcao").unwrap();
    assert_eq!(file.contents, "label,subtitle,x,y,priority\nRecepção,,10,10,high");
    assert_eq!(file.file_name, "recepcao.csv");
    assert_eq!(file.mime_type, "text/csv");
}

#[test]
fn test_csv_reimport_of_example() {
    let file = export_to_file(&[reception_node()], ExportFormat::Csv, "recepcao").unwrap();
    let nodes = import_from_str(&file.file_name, &file.contents).unwrap();

    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].label, "Recepção");
    assert_eq!(nodes[0].position, Position::new(10.0, 10.0));
    assert_eq!(nodes[0].priority, Priority::High);
    assert_eq!(nodes[0].subtitle, None);
    // CSV carries no ids, so a fresh one is generated.
    assert_ne!(nodes[0].id, NodeId::from("n1"));
}

#[test]
fn test_json_round_trip_keeps_nodes() {
    let original = three_nodes();
    let file = export_to_file(&original, ExportFormat::Json, "ward flow").unwrap();
    assert_eq!(file.file_name, "ward_flow.json");

    let imported = import_from_str(&file.file_name, &file.contents).unwrap();
    assert_eq!(imported, original);
}

#[test]
fn test_json_document_layout() {
    let file = export_to_file(&three_nodes(), ExportFormat::Json, "layout").unwrap();
    let doc: serde_json::Value = serde_json::from_str(&file.contents).unwrap();

    assert_eq!(doc["version"], "1.0");
    assert_eq!(doc["metadata"]["name"], "layout");
    assert!(doc["metadata"]["createdAt"].is_string());
    assert_eq!(doc["nodes"].as_array().unwrap().len(), 3);
    assert_eq!(doc["nodes"][2]["parentId"], "b");
    assert_eq!(doc["nodes"][1]["kind"]["type"], "department");
    assert_eq!(doc["nodes"][1]["kind"]["department"], "triage");
    assert!(doc["nodes"][0].get("color").is_none());
}

#[test]
fn test_csv_round_trip_ignores_ids() {
    let original = three_nodes();
    let file = export_to_file(&original, ExportFormat::Csv, "flow").unwrap();
    let imported = import_from_str("flow.csv", &file.contents).unwrap();

    assert_eq!(imported.len(), original.len());
    for (a, b) in original.iter().zip(&imported) {
        assert_eq!(a.label, b.label);
        assert_eq!(a.subtitle, b.subtitle);
        assert_eq!(a.position, b.position);
        assert_eq!(a.priority, b.priority);
    }
}

#[test]
fn test_csv_quotes_fields_with_commas() {
    let node = WorkflowNode::with_id("q", "Lab, \"fast\"", Position::new(1.5, 2.0), Priority::Low)
        .subtitle("line one\nline two");
    let file = export_to_file(&[node], ExportFormat::Csv, "quoted").unwrap();
    assert_eq!(
        file.contents,
        "label,subtitle,x,y,priority\n\"Lab, \"\"fast\"\"\",\"line one\nline two\",1.5,2,low"
    );

    let imported = import_from_str("quoted.csv", &file.contents).unwrap();
    assert_eq!(imported[0].label, "Lab, \"fast\"");
    assert_eq!(imported[0].subtitle.as_deref(), Some("line one\nline two"));
    assert_eq!(imported[0].position, Position::new(1.5, 2.0));
}

#[test]
fn test_csv_missing_priority_column_is_rejected() {
    let err = import_from_str("nodes.csv", CSV_WITHOUT_PRIORITY).unwrap_err();
    assert!(matches!(err, ImportError::Malformed(ref m) if m.contains("priority")));
}

#[test]
fn test_csv_columns_in_any_order_and_crlf() {
    let text = "priority,x,y,label\r\nHIGH,5,6,Pharmacy\r\n\r\nlow,7,8,Radiology\r\n";
    let nodes = import_from_str("NODES.CSV", text).unwrap();
    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[0].label, "Pharmacy");
    assert_eq!(nodes[0].priority, Priority::High);
    assert_eq!(nodes[1].position, Position::new(7.0, 8.0));
}

#[test]
fn test_csv_non_numeric_coordinate_is_rejected() {
    let text = "label,subtitle,x,y,priority\nReception,,ten,10,high";
    let err = import_from_str("nodes.csv", text).unwrap_err();
    assert!(matches!(
        err,
        ImportError::InvalidField { index: 0, ref field, .. } if field == "x"
    ));
}

#[test]
fn test_csv_empty_cell_counts_as_missing() {
    let text = "label,subtitle,x,y,priority\nReception,,1,2,high\n,,3,4,low";
    let err = import_from_str("nodes.csv", text).unwrap_err();
    assert_eq!(
        err,
        ImportError::MissingField {
            index: 1,
            field: "label".to_string()
        }
    );
}

#[test]
fn test_csv_short_row_is_malformed() {
    let text = "label,subtitle,x,y,priority\nReception,10,10,high";
    assert!(matches!(
        import_from_str("nodes.csv", text),
        Err(ImportError::Malformed(_))
    ));
}

#[test]
fn test_json_missing_field_is_rejected() {
    let err = import_from_str("nodes.json", JSON_MISSING_Y).unwrap_err();
    assert_eq!(
        err,
        ImportError::MissingField {
            index: 1,
            field: "y".to_string()
        }
    );
}

#[test]
fn test_json_string_coordinate_is_rejected() {
    let text = r#"[{ "label": "Reception", "x": "10", "y": 0, "priority": "low" }]"#;
    let err = import_from_str("nodes.json", text).unwrap_err();
    assert!(matches!(err, ImportError::InvalidField { ref field, .. } if field == "x"));
}

#[test]
fn test_json_unknown_priority_is_rejected() {
    let text = r#"[{ "label": "Reception", "x": 1, "y": 2, "priority": "urgent" }]"#;
    let err = import_from_str("nodes.json", text).unwrap_err();
    assert!(err.to_string().contains("urgent"));
}

#[test]
fn test_json_bare_array_gets_ids() {
    let text = r#"[
        { "label": "Reception", "x": 1, "y": 2, "priority": "low" },
        { "id": "dup", "label": "Triage", "x": 3, "y": 4, "priority": "medium" },
        { "id": "dup", "label": "Ward", "x": 5, "y": 6, "priority": "high" }
    ]"#;
    let nodes = import_from_str("nodes.json", text).unwrap();
    assert_eq!(nodes.len(), 3);
    assert!(!nodes[0].id.as_str().is_empty());
    assert_eq!(nodes[1].id, NodeId::from("dup"));
    assert_ne!(nodes[2].id, NodeId::from("dup"));
    assert_eq!(nodes[0].kind, NodeKind::default());
}

#[test]
fn test_json_kind_is_parsed() {
    let text = r#"[{ "label": "North", "x": 0, "y": 0, "priority": "high",
                     "kind": { "type": "network", "region": "North" } },
                   { "label": "St. Mary", "x": 0, "y": 0, "priority": "high",
                     "kind": { "type": "hospital", "beds": 320 } }]"#;
    let nodes = import_from_str("nodes.json", text).unwrap();
    assert_eq!(
        nodes[0].kind,
        NodeKind::Network {
            region: Some("North".to_string())
        }
    );
    assert_eq!(nodes[1].kind, NodeKind::Hospital { beds: Some(320) });
}

#[test]
fn test_unsupported_extension_is_rejected() {
    let err = import_from_str("nodes.xlsx", "whatever").unwrap_err();
    assert_eq!(err, ImportError::UnsupportedFormat("nodes.xlsx".to_string()));
}

#[test]
fn test_invalid_json_is_malformed() {
    assert!(matches!(
        import_from_str("nodes.json", "{ not json"),
        Err(ImportError::Malformed(_))
    ));
}

#[test]
fn test_write_and_import_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = export_to_file(&three_nodes(), ExportFormat::Json, "on disk").unwrap();
    let path = write_export(&file, dir.path()).unwrap();
    assert!(path.ends_with("on_disk.json"));

    let imported = import_from_file(&path).unwrap();
    assert_eq!(imported, three_nodes());
}

#[test]
fn test_import_missing_file_reports_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = import_from_file(&dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, ImportError::Io { .. }));
}

#[test]
fn test_csv_keeps_surrounding_whitespace_in_text() {
    let node = WorkflowNode::with_id("w", "  Ward ", Position::new(3.0, 4.0), Priority::Medium)
        .subtitle(" sub");
    let file = export_to_file(&[node], ExportFormat::Csv, "padded").unwrap();
    assert_eq!(
        file.contents,
        "label,subtitle,x,y,priority\n\"  Ward \",\" sub\",3,4,medium"
    );

    let imported = import_from_str(&file.file_name, &file.contents).unwrap();
    assert_eq!(imported[0].label, "  Ward ");
    assert_eq!(imported[0].subtitle.as_deref(), Some(" sub"));

    // Numeric and priority cells still tolerate padding.
    let text = "label,subtitle,x,y,priority\nLab,, 5 , 6 , HIGH ";
    let nodes = import_from_str("nodes.csv", text).unwrap();
    assert_eq!(nodes[0].position, Position::new(5.0, 6.0));
    assert_eq!(nodes[0].priority, Priority::High);
}

#[test]
fn test_export_rejects_non_finite_position() {
    let node = WorkflowNode::with_id("nan", "Lost", Position::new(f64::NAN, 1.0), Priority::Low);
    for format in [ExportFormat::Json, ExportFormat::Csv] {
        let err = export_to_file(&[node.clone()], format, "broken").unwrap_err();
        assert!(matches!(err, ExportError::Serialization(ref m) if m.contains("nan")));
    }
}
