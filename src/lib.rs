// Copyright (c) 2025 Ledgerline Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod aggregate;
pub mod chart;
pub mod cli;
pub mod commands;
pub mod db;
pub mod errors;
pub mod models;
pub mod session;
pub mod store;
pub mod timewin;
pub mod utils;
