use crate::model::{
    DepartmentType, ExceptionFlow, NodeKind, Position, Priority, SlaSettings, WorkflowNode,
    WorkflowTemplate,
};
use ahash::AHashMap;

/// Read-only list of templates a new workflow can start from.
#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    templates: Vec<WorkflowTemplate>,
    index: AHashMap<String, usize>,
}

impl Default for TemplateCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TemplateCatalog {
    pub fn empty() -> Self {
        Self {
            templates: Vec::new(),
            index: AHashMap::new(),
        }
    }

    /// The hospital-network templates shipped with the editor.
    pub fn builtin() -> Self {
        Self::empty()
            .with_template(emergency_care())
            .with_template(elective_surgery())
            .with_template(outpatient_consultation())
    }

    /// Adds a template, replacing any earlier one with the same id.
    pub fn with_template(mut self, template: WorkflowTemplate) -> Self {
        match self.index.get(&template.id) {
            Some(&slot) => self.templates[slot] = template,
            None => {
                self.index.insert(template.id.clone(), self.templates.len());
                self.templates.push(template);
            }
        }
        self
    }

    pub fn get(&self, id: &str) -> Option<&WorkflowTemplate> {
        self.index.get(id).map(|&slot| &self.templates[slot])
    }

    pub fn templates(&self) -> &[WorkflowTemplate] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

fn department(
    id: &str,
    label: &str,
    department: DepartmentType,
    x: f64,
    y: f64,
    priority: Priority,
) -> WorkflowNode {
    WorkflowNode::with_id(id, label, Position::new(x, y), priority)
        .color(department.default_color())
        .kind(NodeKind::Department { department })
}

fn emergency_care() -> WorkflowTemplate {
    WorkflowTemplate {
        id: "emergency-care".to_string(),
        name: "Emergency Care".to_string(),
        description: "Walk-in emergency pathway from reception to discharge".to_string(),
        base_nodes: vec![
            department("er-reception", "Reception", DepartmentType::Reception, 40.0, 80.0, Priority::High)
                .subtitle("Patient registration"),
            department("er-triage", "Triage", DepartmentType::Triage, 260.0, 80.0, Priority::High)
                .subtitle("Manchester protocol"),
            department("er-care", "Emergency Room", DepartmentType::Emergency, 480.0, 80.0, Priority::High),
            department("er-lab", "Laboratory", DepartmentType::Laboratory, 480.0, 240.0, Priority::Medium)
                .parent("er-care".into()),
            department("er-discharge", "Discharge", DepartmentType::Discharge, 700.0, 80.0, Priority::Low),
        ],
        sla_settings: Some(SlaSettings {
            response_minutes: 15,
            escalation_minutes: 30,
            escalation_contact: Some("On-call emergency coordinator".to_string()),
        }),
        exception_flows: vec![
            ExceptionFlow {
                name: "Critical patient".to_string(),
                trigger: "Triage classifies the patient as red".to_string(),
                target_node: "Intensive Care".to_string(),
            },
            ExceptionFlow {
                name: "Left without being seen".to_string(),
                trigger: "Patient absent when called".to_string(),
                target_node: "Discharge".to_string(),
            },
        ],
    }
}

fn elective_surgery() -> WorkflowTemplate {
    WorkflowTemplate {
        id: "elective-surgery".to_string(),
        name: "Elective Surgery".to_string(),
        description: "Scheduled surgical admission through recovery".to_string(),
        base_nodes: vec![
            department("sx-admission", "Admission", DepartmentType::Reception, 40.0, 80.0, Priority::Medium),
            department("sx-preop", "Pre-operative Exams", DepartmentType::Laboratory, 260.0, 80.0, Priority::Medium),
            department("sx-theatre", "Operating Theatre", DepartmentType::Surgery, 480.0, 80.0, Priority::High),
            department("sx-icu", "Intensive Care", DepartmentType::Icu, 700.0, 0.0, Priority::High)
                .parent("sx-theatre".into()),
            department("sx-ward", "Recovery Ward", DepartmentType::Ward, 700.0, 160.0, Priority::Medium),
            department("sx-discharge", "Discharge", DepartmentType::Discharge, 920.0, 80.0, Priority::Low),
        ],
        sla_settings: Some(SlaSettings {
            response_minutes: 60,
            escalation_minutes: 240,
            escalation_contact: None,
        }),
        exception_flows: vec![ExceptionFlow {
            name: "Post-operative complication".to_string(),
            trigger: "Vital signs outside the recovery range".to_string(),
            target_node: "Intensive Care".to_string(),
        }],
    }
}

fn outpatient_consultation() -> WorkflowTemplate {
    WorkflowTemplate {
        id: "outpatient".to_string(),
        name: "Outpatient Consultation".to_string(),
        description: "Scheduled consultation with optional imaging and pharmacy".to_string(),
        base_nodes: vec![
            department("op-reception", "Reception", DepartmentType::Reception, 40.0, 80.0, Priority::Low),
            department("op-consult", "Consultation", DepartmentType::General, 260.0, 80.0, Priority::Medium),
            department("op-imaging", "Radiology", DepartmentType::Radiology, 480.0, 0.0, Priority::Low)
                .parent("op-consult".into()),
            department("op-pharmacy", "Pharmacy", DepartmentType::Pharmacy, 480.0, 160.0, Priority::Low),
        ],
        sla_settings: None,
        exception_flows: Vec::new(),
    }
}
