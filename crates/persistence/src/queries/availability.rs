// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use canteen_domain::AvailabilitySet;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::diesel_schema::sold_out_items;
use crate::error::PersistenceError;

backend_fn! {
/// Loads the set of sold out item ids.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn load_availability(conn: &mut _) -> Result<AvailabilitySet, PersistenceError> {
    let ids: Vec<String> = sold_out_items::table
        .select(sold_out_items::item_id)
        .load(conn)?;

    Ok(AvailabilitySet::from_ids(ids))
}
}
