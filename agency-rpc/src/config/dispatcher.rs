use std::time::Duration;

use rst_common::standard::serde::{self, Deserialize};

use prople_agency_core::agency::dispatcher::ReconnectPolicy;

use crate::common::types::{CommonError, ToValidate};

/// `Dispatcher` configures the notification subscription
#[derive(Deserialize, Debug, Clone)]
#[serde(crate = "self::serde")]
#[serde(default)]
pub struct Dispatcher {
    pub(super) max_reconnect_attempts: u32,
    pub(super) initial_backoff_ms: u64,
    pub(super) max_backoff_ms: u64,
    pub(super) buffer: usize,
}

impl Dispatcher {
    pub fn build_policy(&self) -> ReconnectPolicy {
        ReconnectPolicy::new(
            self.max_reconnect_attempts,
            Duration::from_millis(self.initial_backoff_ms),
            Duration::from_millis(self.max_backoff_ms),
        )
    }

    pub fn get_buffer(&self) -> usize {
        self.buffer
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self {
            max_reconnect_attempts: 0,
            initial_backoff_ms: 1000,
            max_backoff_ms: 30000,
            buffer: 32,
        }
    }
}

impl ToValidate for Dispatcher {
    fn validate(&self) -> Result<(), CommonError> {
        if self.buffer == 0 {
            return Err(CommonError::ValidationError(
                "config: dispatcher:buffer must be greater than zero".to_string(),
            ));
        }

        if self.initial_backoff_ms > self.max_backoff_ms {
            return Err(CommonError::ValidationError(
                "config: dispatcher:initial_backoff_ms is greater than max_backoff_ms"
                    .to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::helpers;

    #[test]
    fn test_default_policy() {
        let dispatcher = Dispatcher::default();
        assert!(helpers::validate(dispatcher.clone()).is_ok());
        assert_eq!(dispatcher.build_policy(), ReconnectPolicy::default())
    }

    #[test]
    fn test_dispatcher_validation_failed() {
        let mut dispatcher = Dispatcher::default();
        dispatcher.initial_backoff_ms = 60000;

        let validation = helpers::validate(dispatcher);
        assert!(validation.is_err());
        assert!(validation
            .unwrap_err()
            .to_string()
            .contains("dispatcher:initial_backoff_ms"))
    }
}
