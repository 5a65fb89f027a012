// Copyright (c) 2025 Wonbook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod calendar;
pub mod categories;
pub mod stats;
pub mod transactions;
