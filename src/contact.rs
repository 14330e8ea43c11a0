use std::collections::HashMap;

use serde::Serialize;

pub const LEAD_SOURCE: &str = "Website - CS Infraestructura";
pub const LEAD_TAGS: [&str; 2] = ["Website Lead", "Cotización"];

pub const SUCCESS_BACKGROUND: &str = "#2E7D32";
pub const FAILURE_BACKGROUND: &str = "#C62828";

pub const LOADING_LABEL: &str = r#"<span>Enviando...</span>
<svg class="spinner" width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2">
    <circle cx="12" cy="12" r="10" stroke-dasharray="60" stroke-dashoffset="20">
        <animateTransform attributeName="transform" type="rotate" from="0 12 12" to="360 12 12" dur="1s" repeatCount="indefinite"/>
    </circle>
</svg>"#;

pub const SUCCESS_LABEL: &str = r#"<span>¡Enviado!</span>
<svg width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2">
    <polyline points="20 6 9 17 4 12"/>
</svg>"#;

pub const FAILURE_LABEL: &str = r#"<span>Error - Intente de nuevo</span>
<svg width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2">
    <circle cx="12" cy="12" r="10"/>
    <line x1="15" y1="9" x2="9" y2="15"/>
    <line x1="9" y1="9" x2="15" y2="15"/>
</svg>"#;

pub mod field {
    pub const NAME: &str = "nombre";
    pub const EMAIL: &str = "email";
    pub const PHONE: &str = "telefono";
    pub const COMPANY: &str = "empresa";
    pub const SERVICE: &str = "servicio";
    pub const BUDGET: &str = "presupuesto";
    pub const DESCRIPTION: &str = "descripcion";

    pub const ALL: [&str; 7] = [NAME, EMAIL, PHONE, COMPANY, SERVICE, BUDGET, DESCRIPTION];
}

pub type FormFields = HashMap<String, String>;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPayload {
    pub first_name: String,
    pub last_name: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company_name: String,
    pub source: String,
    pub servicio: String,
    pub presupuesto: String,
    pub mensaje: String,
    pub tags: [String; 2],
}

impl ContactPayload {
    pub fn from_fields(fields: &FormFields) -> Self {
        let get = |key: &str| fields.get(key).cloned().unwrap_or_default();
        let name = get(field::NAME);
        let (first_name, last_name) = split_full_name(&name);

        Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: get(field::EMAIL),
            phone: get(field::PHONE),
            company_name: get(field::COMPANY),
            source: LEAD_SOURCE.to_string(),
            servicio: get(field::SERVICE),
            presupuesto: get(field::BUDGET),
            mensaje: get(field::DESCRIPTION),
            tags: LEAD_TAGS.map(String::from),
            name,
        }
    }
}

/// Splits at the first space: the first token is the first name and the rest,
/// verbatim, is the last name.
pub fn split_full_name(name: &str) -> (&str, &str) {
    name.split_once(' ').unwrap_or((name, ""))
}

pub fn is_success_status(status: u16) -> bool {
    (200..300).contains(&status)
}

/// UTF-16 length, matching what `maxlength` on the textarea counts.
pub fn char_count(value: &str) -> usize {
    value.encode_utf16().count()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitPhase {
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

impl SubmitPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Submitting => "submitting",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }
}

/// Submit button lifecycle. Each transition returns `false` when it does not
/// apply to the current phase, leaving the flow untouched.
#[derive(Debug)]
pub struct SubmitFlow {
    phase: SubmitPhase,
    original_label: Option<String>,
}

impl Default for SubmitFlow {
    fn default() -> Self {
        Self {
            phase: SubmitPhase::Idle,
            original_label: None,
        }
    }
}

impl SubmitFlow {
    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    pub fn begin(&mut self, current_label: String) -> bool {
        if self.phase != SubmitPhase::Idle {
            return false;
        }

        self.original_label = Some(current_label);
        self.phase = SubmitPhase::Submitting;
        true
    }

    pub fn finish(&mut self, succeeded: bool) -> bool {
        if self.phase != SubmitPhase::Submitting {
            return false;
        }

        self.phase = if succeeded {
            SubmitPhase::Succeeded
        } else {
            SubmitPhase::Failed
        };
        true
    }

    pub fn settle(&mut self) -> Option<(SubmitPhase, String)> {
        if !matches!(self.phase, SubmitPhase::Succeeded | SubmitPhase::Failed) {
            return None;
        }

        let settled = self.phase;
        self.phase = SubmitPhase::Idle;
        Some((settled, self.original_label.take().unwrap_or_default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> FormFields {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn payload_splits_full_name_into_first_and_last() {
        let payload = ContactPayload::from_fields(&fields(&[
            ("nombre", "Juan Pérez"),
            ("email", "j@x.com"),
        ]));

        assert_eq!(payload.first_name, "Juan");
        assert_eq!(payload.last_name, "Pérez");
        assert_eq!(payload.name, "Juan Pérez");
        assert_eq!(payload.email, "j@x.com");
        assert_eq!(payload.phone, "");
    }

    #[test]
    fn split_full_name_keeps_remainder_verbatim() {
        assert_eq!(split_full_name("María José de la Fuente"), ("María", "José de la Fuente"));
        assert_eq!(split_full_name("Cher"), ("Cher", ""));
        assert_eq!(split_full_name(""), ("", ""));
    }

    #[test]
    fn payload_serializes_to_webhook_schema() {
        let payload = ContactPayload::from_fields(&fields(&[
            ("nombre", "Ana Soto"),
            ("email", "ana@minera.cl"),
            ("telefono", "+56 9 1234 5678"),
            ("empresa", "Minera Norte"),
            ("servicio", "montaje"),
            ("presupuesto", "50-100M"),
            ("descripcion", "Galpón de 2.000 m2"),
        ]));

        let json = serde_json::to_value(&payload).expect("payload serializes");
        assert_eq!(
            json,
            serde_json::json!({
                "firstName": "Ana",
                "lastName": "Soto",
                "name": "Ana Soto",
                "email": "ana@minera.cl",
                "phone": "+56 9 1234 5678",
                "companyName": "Minera Norte",
                "source": "Website - CS Infraestructura",
                "servicio": "montaje",
                "presupuesto": "50-100M",
                "mensaje": "Galpón de 2.000 m2",
                "tags": ["Website Lead", "Cotización"],
            })
        );
    }

    #[test]
    fn any_2xx_status_is_success() {
        assert!(is_success_status(200));
        assert!(is_success_status(201));
        assert!(is_success_status(204));
        assert!(!is_success_status(199));
        assert!(!is_success_status(302));
        assert!(!is_success_status(500));
    }

    #[test]
    fn char_count_uses_utf16_units() {
        assert_eq!(char_count(""), 0);
        assert_eq!(char_count("Galpón"), 6);
        assert_eq!(char_count("🏗"), 2);
    }

    #[test]
    fn flow_walks_idle_submitting_failed_idle() {
        let mut flow = SubmitFlow::default();

        assert!(flow.begin("Enviar".to_string()));
        assert!(!flow.begin("ignored".to_string()));
        assert_eq!(flow.settle(), None);
        assert!(flow.finish(false));
        assert!(!flow.finish(true));
        assert_eq!(flow.phase(), SubmitPhase::Failed);
        assert_eq!(flow.settle(), Some((SubmitPhase::Failed, "Enviar".to_string())));
        assert_eq!(flow.phase(), SubmitPhase::Idle);
    }
}
