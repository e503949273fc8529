use sqlx::PgConnection;

use scriptdb_core::{Error, Result};

fn db_error(err: sqlx::Error) -> Error {
    Error::Db(err.to_string())
}

pub struct RawDomain {
    pub schema: String,
    pub name: String,
    pub base_type: String,
    pub type_modifier: i32,
}

pub async fn list_domains(conn: &mut PgConnection) -> Result<Vec<RawDomain>> {
    let rows = sqlx::query_as::<_, (String, String, String, i32)>(
        r#"
        select
          n.nspname::text,
          t.typname::text,
          bt.typname::text,
          t.typtypmod
        from pg_type t
        join pg_namespace n on n.oid = t.typnamespace
        join pg_type bt on bt.oid = t.typbasetype
        where t.typtype = 'd'
        "#,
    )
    .fetch_all(&mut *conn)
    .await
    .map_err(db_error)?;

    Ok(rows
        .into_iter()
        .map(|(schema, name, base_type, type_modifier)| RawDomain {
            schema,
            name,
            base_type,
            type_modifier,
        })
        .collect())
}

pub struct RawRelation {
    pub schema: String,
    pub name: String,
    pub relkind: String,
}

pub async fn list_relations(conn: &mut PgConnection) -> Result<Vec<RawRelation>> {
    let rows = sqlx::query_as::<_, (String, String, String)>(
        r#"
        select
          n.nspname::text,
          c.relname::text,
          c.relkind::text
        from pg_class c
        join pg_namespace n on n.oid = c.relnamespace
        where c.relkind in ('r', 'p', 'v', 'm')
        "#,
    )
    .fetch_all(&mut *conn)
    .await
    .map_err(db_error)?;

    Ok(rows
        .into_iter()
        .map(|(schema, name, relkind)| RawRelation {
            schema,
            name,
            relkind,
        })
        .collect())
}

pub struct RawColumn {
    pub name: String,
    pub type_name: String,
    pub type_modifier: i32,
}

/// Columns of one relation in declared order. Domain-typed columns report
/// the domain's base type and modifier.
pub async fn list_columns(
    conn: &mut PgConnection,
    schema: &str,
    table: &str,
) -> Result<Vec<RawColumn>> {
    let rows = sqlx::query_as::<_, (String, String, i32)>(
        r#"
        select
          a.attname::text,
          coalesce(bt.typname, t.typname)::text,
          case when t.typtype = 'd' then t.typtypmod else a.atttypmod end
        from pg_attribute a
        join pg_class c on c.oid = a.attrelid
        join pg_namespace n on n.oid = c.relnamespace
        join pg_type t on t.oid = a.atttypid
        left join pg_type bt on bt.oid = t.typbasetype and t.typtype = 'd'
        where n.nspname = $1
          and c.relname = $2
          and a.attnum > 0
          and not a.attisdropped
        order by a.attnum
        "#,
    )
    .bind(schema)
    .bind(table)
    .fetch_all(&mut *conn)
    .await
    .map_err(db_error)?;

    Ok(rows
        .into_iter()
        .map(|(name, type_name, type_modifier)| RawColumn {
            name,
            type_name,
            type_modifier,
        })
        .collect())
}

pub struct RawProcedure {
    pub schema: String,
    pub name: String,
}

pub async fn list_procedures(conn: &mut PgConnection) -> Result<Vec<RawProcedure>> {
    let rows = sqlx::query_as::<_, (String, String)>(
        r#"
        select
          n.nspname::text,
          p.proname::text
        from pg_proc p
        join pg_namespace n on n.oid = p.pronamespace
        where p.prokind = 'p'
        "#,
    )
    .fetch_all(&mut *conn)
    .await
    .map_err(db_error)?;

    Ok(rows
        .into_iter()
        .map(|(schema, name)| RawProcedure { schema, name })
        .collect())
}
