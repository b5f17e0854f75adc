/// Fetch a single row by primary key, as the given output type.
#[macro_export]
macro_rules! get_object {
    ($schema: ident, $state: expr, $output: ty, $id: expr) => {{
        let id = $id;
        $state.db.interact(move |conn| {
            $schema::table
                .find(id)
                .select(<$output>::as_select())
                .first::<$output>(conn)
                .map_err($crate::Error::from)
        })
    }};
}

/// Apply a changeset to the row with this id. Reports NotFound if nothing was updated.
#[macro_export]
macro_rules! update_object {
    ($schema: ident, $state: expr, $id: expr, $changes: expr) => {{
        let id = $id;
        let changes = $changes;
        $state.db.interact(move |conn| {
            let updated = diesel::update($schema::table.find(id))
                .set(changes)
                .execute(conn)?;

            if updated == 0 {
                Err($crate::Error::NotFound)
            } else {
                Ok(())
            }
        })
    }};
}

/// Delete a row and everything that cascades from it. Reports NotFound if nothing was deleted.
#[macro_export]
macro_rules! delete_object {
    ($schema: ident, $state: expr, $id: expr) => {{
        let id = $id;
        $state.db.interact(move |conn| {
            let deleted = diesel::delete($schema::table.find(id)).execute(conn)?;

            if deleted == 0 {
                Err($crate::Error::NotFound)
            } else {
                Ok(())
            }
        })
    }};
}
