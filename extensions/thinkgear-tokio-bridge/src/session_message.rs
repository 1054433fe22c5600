use crate::SessionIdentity;
use serde::{Deserialize, Serialize};
use thinkgear::Sample;

/// An outbound message on the session transport.
///
/// Serialized as `{"event": "<name>", "data": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum SessionMessage {
    #[serde(rename = "student:join")]
    StudentJoin(StudentJoin),

    #[serde(rename = "eeg:data")]
    EegData(EegData),

    #[serde(rename = "student:leave")]
    StudentLeave(StudentLeave),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentJoin {
    pub session_id: String,
    pub student_id: String,
}

/// One published sample.
///
/// Band pairs are collapsed to their floor average: `alpha` from low and high
/// alpha, `beta` from low and high beta, `gamma` from low and mid gamma.
/// Fields missing from the sample are sent as `0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EegData {
    pub student_id: String,
    pub session_id: String,
    /// ISO-8601 UTC.
    pub timestamp: String,
    pub attention: u8,
    pub relaxation: u8,
    pub signal_quality: i16,
    pub delta: u32,
    pub theta: u32,
    pub alpha: u32,
    pub beta: u32,
    pub gamma: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentLeave {
    pub session_id: String,
}

impl SessionMessage {
    pub fn join(identity: &SessionIdentity) -> Self {
        SessionMessage::StudentJoin(StudentJoin {
            session_id: identity.session_id.clone(),
            student_id: identity.student_id.clone(),
        })
    }

    pub fn leave(identity: &SessionIdentity) -> Self {
        SessionMessage::StudentLeave(StudentLeave {
            session_id: identity.session_id.clone(),
        })
    }

    pub fn eeg_data(identity: &SessionIdentity, sample: &Sample, timestamp: String) -> Self {
        let bands = sample.band_powers.unwrap_or_default();

        SessionMessage::EegData(EegData {
            student_id: identity.student_id.clone(),
            session_id: identity.session_id.clone(),
            timestamp,
            attention: sample.attention.unwrap_or(0),
            relaxation: sample.relaxation.unwrap_or(0),
            signal_quality: sample.signal_quality.unwrap_or(0),
            delta: bands.delta,
            theta: bands.theta,
            alpha: bands.alpha(),
            beta: bands.beta(),
            gamma: bands.gamma(),
        })
    }

    /// The wire name of this message's event.
    pub fn event_name(&self) -> &'static str {
        match self {
            SessionMessage::StudentJoin(_) => "student:join",
            SessionMessage::EegData(_) => "eeg:data",
            SessionMessage::StudentLeave(_) => "student:leave",
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
