use sqlx::SqliteConnection;

use scriptdb_core::{Error, Result};

fn db_error(err: sqlx::Error) -> Error {
    Error::Db(err.to_string())
}

pub struct RawRelation {
    pub name: String,
    pub kind: String,
}

pub async fn list_relations(conn: &mut SqliteConnection) -> Result<Vec<RawRelation>> {
    let rows = sqlx::query_as::<_, (String, String)>(
        r#"
        select name, type
        from sqlite_master
        where type in ('table', 'view')
        "#,
    )
    .fetch_all(&mut *conn)
    .await
    .map_err(db_error)?;

    Ok(rows
        .into_iter()
        .map(|(name, kind)| RawRelation { name, kind })
        .collect())
}

pub struct RawColumn {
    pub name: String,
    pub declared_type: String,
}

pub async fn list_columns(conn: &mut SqliteConnection, table: &str) -> Result<Vec<RawColumn>> {
    let rows = sqlx::query_as::<_, (String, String)>(
        r#"
        select name, type
        from pragma_table_info(?1)
        order by cid
        "#,
    )
    .bind(table)
    .fetch_all(&mut *conn)
    .await
    .map_err(db_error)?;

    Ok(rows
        .into_iter()
        .map(|(name, declared_type)| RawColumn {
            name,
            declared_type,
        })
        .collect())
}
