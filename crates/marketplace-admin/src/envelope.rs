use serde::{Deserialize, Serialize};

/// `{ "data": ... }` wrapper used by every successful API response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub data: T,
}

impl<T> ApiEnvelope<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }

    pub fn into_data(self) -> T {
        self.data
    }
}
