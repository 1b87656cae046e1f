use serde::Serialize;

/// Progress of a store's most recent operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OpStatus {
    #[default]
    Idle,
    Loading,
}

impl OpStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Status and last error of a store. Every operation goes
/// `Idle -> Loading -> Idle`; a failure leaves its message in `error` until
/// the next operation starts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OpState {
    pub status: OpStatus,
    pub error: Option<String>,
}

impl OpState {
    pub fn begin(&mut self) {
        self.status = OpStatus::Loading;
        self.error = None;
    }

    pub fn finish(&mut self) {
        self.status = OpStatus::Idle;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.status = OpStatus::Idle;
        self.error = Some(message.into());
    }
}
