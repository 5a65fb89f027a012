// Copyright (c) 2025 Wonbook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Rejections on the validated add pathway. Surfaced to the caller as a
/// result value with a readable message; nothing is written on failure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("amount must be greater than zero")]
    NonPositiveAmount,
    #[error("description must not be blank")]
    BlankDescription,
    #[error("transaction has no persisted id")]
    MissingId,
}
