// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! - `catalog` — universities, categories, and candidates
//! - `results` — vote aggregation
//! - `sessions` — admin session lookup
//! - `tickets` — per-device ticket usage
//! - `votes` — device vote history and export rows
//!
//! Every function here goes through the `backend_fn!` macro, which
//! stamps out `_sqlite` and `_mysql` twins. The `Persistence` adapter
//! in `lib.rs` picks the twin that matches its connection.

pub mod catalog;
pub mod results;
pub mod sessions;
pub mod tickets;
pub mod votes;
