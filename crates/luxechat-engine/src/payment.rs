// SPDX-FileCopyrightText: 2026 Luxechat Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Simulated payment step.
//!
//! A stand-in for a real payment gateway: the only validation is a
//! 16-digit count on the card number, and "processing" is a fixed timer.
//! This module has no network code path and must stay that way.

use std::time::Duration;

use tracing::debug;

use luxechat_core::LuxeError;

/// Fake payment processor with a configurable artificial delay.
pub struct PaymentSimulator {
    delay: Duration,
}

impl PaymentSimulator {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
        }
    }

    /// Accepts the card number iff it contains exactly 16 digits, ignoring
    /// formatting spaces. Called before the processing delay so a bad
    /// number is rejected instantly with no state change.
    pub fn validate_card(card_number: &str) -> Result<(), LuxeError> {
        let digits = card_number.chars().filter(char::is_ascii_digit).count();
        if digits == 16 {
            Ok(())
        } else {
            Err(LuxeError::InvalidInput(
                "Silakan masukkan nomor kartu yang valid (16 angka)".to_string(),
            ))
        }
    }

    /// Runs the artificial processing delay. Always succeeds; there is no
    /// declined-payment path in the simulation.
    pub async fn process(&self) {
        debug!(delay_ms = self.delay.as_millis() as u64, "simulating payment");
        tokio::time::sleep(self.delay).await;
    }
}
