//! Integration tests for careflow
//!
//! End-to-end tests that drive a session the way the editor UI does.
//!
mod common;
use careflow::transfer::write_export;
use careflow::prelude::*;
use common::*;
use std::fs;

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn test_template_edit_export_import_cycle() {
        let mut session = EditorSession::builder().build();
        assert!(session.select_template_by_id("emergency-care").unwrap());

        let triage = NodeId::from("er-triage");
        session
            .start_drag(PointerEvent::new(270.0, 90.0), &triage)
            .expect("Failed to start drag");
        session.drag_to(PointerEvent::new(270.0, 290.0));
        session.stop_drag();

        let dir = tempfile::tempdir().unwrap();
        let file = session
            .export_named(ExportFormat::Json, "night shift")
            .expect("Failed to export");
        let path = write_export(&file, dir.path()).expect("Failed to write export");

        let mut other = EditorSession::builder().build();
        let count = other.import_file(&path).expect("Failed to import");
        assert_eq!(count, session.nodes().len());
        assert_eq!(other.nodes(), session.nodes());
        assert_eq!(
            other.store().get(&triage).unwrap().position,
            Position::new(260.0, 280.0)
        );
    }

    #[test]
    fn test_csv_scenario_from_file() {
        let mut session = EditorSession::builder().build();
        session.add_node(reception_node()).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let file = session
            .export_named(ExportFormat::Csv, "recepcao")
            .expect("Failed to export");
        let path = write_export(&file, dir.path()).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "label,subtitle,x,y,priority\nRecepção,,10,10,high"
        );

        let mut fresh = EditorSession::builder().build();
        fresh.import_file(&path).expect("Failed to import");
        let node = &fresh.nodes()[0];
        assert_eq!(node.label, "Recepção");
        assert_eq!(node.position, Position::new(10.0, 10.0));
        assert_eq!(node.priority, Priority::High);
    }

    #[test]
    fn test_rejected_import_file_keeps_canvas() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.csv");
        fs::write(&path, CSV_WITHOUT_PRIORITY).unwrap();

        let mut session = session_with_nodes();
        let before = session.store().clone();
        assert!(session.import_file(&path).is_err());
        assert_eq!(session.store(), &before);

        let unsupported = dir.path().join("nodes.txt");
        fs::write(&unsupported, "label\n").unwrap();
        assert!(matches!(
            session.import_file(&unsupported),
            Err(EditorError::Import(ImportError::UnsupportedFormat(_)))
        ));
    }

    #[test]
    fn test_full_session_through_events() {
        let mut session = EditorSession::builder().with_owner("coordinator").build();

        session
            .handle(EditorEvent::SelectTemplate("outpatient".to_string()))
            .unwrap();
        session
            .handle(EditorEvent::AddSubNode {
                parent: NodeId::from("op-pharmacy"),
                label: "Dispensing".to_string(),
            })
            .unwrap();
        assert_eq!(session.nodes().len(), 5);

        session
            .handle(EditorEvent::OpenModal(ModalRequest::SaveWorkflow))
            .unwrap();
        session
            .handle(EditorEvent::UpdateSaveDraft {
                name: "Outpatient v2".to_string(),
                description: "With dispensing".to_string(),
            })
            .unwrap();
        let saved = session
            .handle(EditorEvent::ConfirmModal(ModalKind::SaveWorkflow))
            .unwrap();
        let EditorOutcome::WorkflowSaved(saved_id) = saved else {
            panic!("expected the workflow to be saved");
        };

        session
            .handle(EditorEvent::OpenModal(ModalRequest::Authorization))
            .unwrap();
        let authorized = session
            .handle(EditorEvent::ConfirmModal(ModalKind::Authorization))
            .unwrap();
        assert_eq!(authorized, EditorOutcome::Authorized("coordinator".to_string()));

        session
            .handle(EditorEvent::OpenModal(ModalRequest::CancelWorkflow))
            .unwrap();
        assert_eq!(
            session
                .handle(EditorEvent::ConfirmModal(ModalKind::CancelWorkflow))
                .unwrap(),
            EditorOutcome::WorkflowCleared
        );
        assert!(session.nodes().is_empty());
        assert!(session.authorization().is_none());

        session
            .handle(EditorEvent::LoadSavedWorkflow(saved_id.clone()))
            .unwrap();
        assert_eq!(session.nodes().len(), 5);

        session
            .handle(EditorEvent::OpenModal(ModalRequest::DeleteWorkflow(saved_id.clone())))
            .unwrap();
        assert_eq!(
            session
                .handle(EditorEvent::ConfirmModal(ModalKind::DeleteWorkflow))
                .unwrap(),
            EditorOutcome::WorkflowDeleted(saved_id)
        );
        assert!(session.library().is_empty());
    }
}
