use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mes_core::{DeliveryId, DeliveryStateChangeId, DomainError, DomainResult};

/// Persisted field names of the delivery state-change model.
pub struct DeliveryStateChangeFields;

impl DeliveryStateChangeFields {
    pub const SHIFT: &'static str = "shift";
    pub const WORKER: &'static str = "worker";
    pub const STATUS: &'static str = "status";
    pub const DELIVERY: &'static str = "delivery";
    pub const TARGET_STATE: &'static str = "targetState";
    pub const SOURCE_STATE: &'static str = "sourceState";
    pub const MESSAGES: &'static str = "messages";
    pub const ADDITIONAL_INFO: &'static str = "additionalInformation";
    pub const REASON_REQUIRED: &'static str = "reasonRequired";
    pub const REASON_TYPE: &'static str = "reasonType";
    pub const DATE_AND_TIME: &'static str = "dateAndTime";
}

/// Delivery lifecycle state.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeliveryState {
    Draft,
    Prepared,
    DuringCorrection,
    Declined,
    Approved,
    Received,
}

impl DeliveryState {
    /// States reachable from `self` in one step.
    pub fn allowed_targets(self) -> &'static [DeliveryState] {
        use DeliveryState::*;
        match self {
            Draft => &[Prepared, Declined, Approved],
            Prepared => &[DuringCorrection, Declined, Approved],
            DuringCorrection => &[Prepared, Declined, Approved],
            Approved => &[Received, Declined],
            Declined | Received => &[],
        }
    }

    pub fn can_change_to(self, target: DeliveryState) -> bool {
        self.allowed_targets().contains(&target)
    }
}

/// Progress of a state-change record.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StateChangeStatus {
    InProgress,
    Paused,
    Successful,
    Failure,
    Canceled,
}

impl StateChangeStatus {
    pub fn is_finished(self) -> bool {
        matches!(
            self,
            StateChangeStatus::Successful | StateChangeStatus::Failure | StateChangeStatus::Canceled
        )
    }
}

/// Message attached to a state change, optionally bound to a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateChangeMessage {
    pub field: Option<String>,
    pub text: String,
}

/// Audit record of one delivery state transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryStateChange {
    id: DeliveryStateChangeId,
    delivery: DeliveryId,
    source_state: DeliveryState,
    target_state: DeliveryState,
    status: StateChangeStatus,
    shift: Option<String>,
    worker: Option<String>,
    date_and_time: DateTime<Utc>,
    messages: Vec<StateChangeMessage>,
    additional_information: Option<String>,
    reason_required: bool,
    reason_type: Option<String>,
}

impl DeliveryStateChange {
    /// Start an in-progress state change. Fails when the transition is not allowed.
    pub fn begin(
        id: DeliveryStateChangeId,
        delivery: DeliveryId,
        source_state: DeliveryState,
        target_state: DeliveryState,
        at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        if !source_state.can_change_to(target_state) {
            return Err(DomainError::validation(format!(
                "delivery cannot change from {source_state:?} to {target_state:?}"
            )));
        }
        Ok(Self {
            id,
            delivery,
            source_state,
            target_state,
            status: StateChangeStatus::InProgress,
            shift: None,
            worker: None,
            date_and_time: at,
            messages: Vec::new(),
            additional_information: None,
            reason_required: false,
            reason_type: None,
        })
    }

    pub fn with_shift(mut self, shift: impl Into<String>) -> Self {
        self.shift = Some(shift.into());
        self
    }

    pub fn with_worker(mut self, worker: impl Into<String>) -> Self {
        self.worker = Some(worker.into());
        self
    }

    pub fn require_reason(mut self) -> Self {
        self.reason_required = true;
        self
    }

    pub fn id(&self) -> DeliveryStateChangeId {
        self.id
    }

    pub fn delivery(&self) -> DeliveryId {
        self.delivery
    }

    pub fn source_state(&self) -> DeliveryState {
        self.source_state
    }

    pub fn target_state(&self) -> DeliveryState {
        self.target_state
    }

    pub fn status(&self) -> StateChangeStatus {
        self.status
    }

    pub fn shift(&self) -> Option<&str> {
        self.shift.as_deref()
    }

    pub fn worker(&self) -> Option<&str> {
        self.worker.as_deref()
    }

    pub fn date_and_time(&self) -> DateTime<Utc> {
        self.date_and_time
    }

    pub fn messages(&self) -> &[StateChangeMessage] {
        &self.messages
    }

    pub fn additional_information(&self) -> Option<&str> {
        self.additional_information.as_deref()
    }

    pub fn reason_required(&self) -> bool {
        self.reason_required
    }

    pub fn reason_type(&self) -> Option<&str> {
        self.reason_type.as_deref()
    }

    /// Record why the change happens (may resume a paused change).
    pub fn set_reason(
        &mut self,
        reason_type: impl Into<String>,
        additional_information: Option<String>,
    ) -> DomainResult<()> {
        self.ensure_open()?;
        self.reason_type = Some(reason_type.into());
        self.additional_information = additional_information;
        if self.status == StateChangeStatus::Paused {
            self.status = StateChangeStatus::InProgress;
        }
        Ok(())
    }

    /// Complete the change, or pause it while a required reason is missing.
    pub fn finish(&mut self) -> DomainResult<StateChangeStatus> {
        self.ensure_open()?;
        if self.reason_required && self.reason_type.is_none() {
            self.status = StateChangeStatus::Paused;
            self.messages.push(StateChangeMessage {
                field: Some(DeliveryStateChangeFields::REASON_TYPE.to_string()),
                text: "reason is required to change delivery state".to_string(),
            });
        } else {
            self.status = StateChangeStatus::Successful;
        }
        Ok(self.status)
    }

    pub fn fail(&mut self, message: impl Into<String>) -> DomainResult<()> {
        self.ensure_open()?;
        self.status = StateChangeStatus::Failure;
        self.messages.push(StateChangeMessage {
            field: None,
            text: message.into(),
        });
        Ok(())
    }

    pub fn cancel(&mut self) -> DomainResult<()> {
        self.ensure_open()?;
        self.status = StateChangeStatus::Canceled;
        Ok(())
    }

    fn ensure_open(&self) -> DomainResult<()> {
        if self.status.is_finished() {
            return Err(DomainError::invariant(format!(
                "state change already finished ({:?})",
                self.status
            )));
        }
        Ok(())
    }
}
