// Copyright (c) 2025 Wonbook contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod cli;
pub mod db;
pub mod error;
pub mod live;
pub mod models;
pub mod repository;
pub mod stats;
pub mod store;
pub mod utils;
pub mod view;
pub mod commands;
