// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write operations.
//!
//! - `catalog` — category and candidate upserts and deletes
//! - `sessions` — admin session lifecycle
//! - `universities` — university provisioning
//! - `votes` — ballot insertion
//!
//! Like `queries/`, everything here goes through the `backend_fn!`
//! macro and exists as `_sqlite` and `_mysql` twins, dispatched by the
//! `Persistence` adapter in `lib.rs`.

pub mod catalog;
pub mod sessions;
pub mod universities;
pub mod votes;
