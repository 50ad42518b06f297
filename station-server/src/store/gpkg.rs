//! GeoPackage layer reader.

use std::path::Path;

use geojson::JsonObject;
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags, OptionalExtension};
use tracing::debug;

use super::error::{GeometryError, LoadError};
use super::wkb::decode_gpkg;
use super::{Layer, LayerFeature};

/// Read every feature of `layer` from the GeoPackage at `path`.
///
/// Features are returned in rowid order. The integer primary key is not
/// exposed; every other non-geometry column becomes a JSON property.
pub fn read_layer(path: &Path, layer: &str) -> Result<Layer, LoadError> {
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let sql_err = |source| LoadError::Sqlite {
        layer: layer.to_string(),
        source,
    };

    let geometry_column = geometry_column(&conn, layer)
        .map_err(sql_err)?
        .ok_or_else(|| LoadError::MissingLayer {
            path: path.to_path_buf(),
            layer: layer.to_string(),
        })?;
    let primary_key = primary_key(&conn, layer).map_err(sql_err)?;

    let sql = format!("SELECT * FROM {} ORDER BY rowid", quote_ident(layer));
    let mut stmt = conn.prepare(&sql).map_err(sql_err)?;
    let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

    let mut rows = stmt.query([]).map_err(sql_err)?;
    let mut features = Vec::new();

    while let Some(row) = rows.next().map_err(sql_err)? {
        let index = features.len();
        let mut properties = JsonObject::new();
        let mut geometry = None;

        for (i, column) in columns.iter().enumerate() {
            let value = row.get_ref(i).map_err(sql_err)?;

            if column.eq_ignore_ascii_case(&geometry_column) {
                geometry = decode_geometry(value).map_err(|source| LoadError::Geometry {
                    layer: layer.to_string(),
                    index,
                    source,
                })?;
            } else if primary_key
                .as_deref()
                .is_some_and(|pk| column.eq_ignore_ascii_case(pk))
            {
                continue;
            } else {
                properties.insert(column.clone(), json_value(value));
            }
        }

        features.push(LayerFeature {
            properties,
            geometry,
        });
    }

    debug!(
        layer,
        path = %path.display(),
        features = features.len(),
        "loaded layer"
    );

    Ok(Layer {
        name: layer.to_string(),
        features,
    })
}

/// Look up the geometry column registered for `layer`.
fn geometry_column(conn: &Connection, layer: &str) -> rusqlite::Result<Option<String>> {
    conn.query_row(
        "SELECT column_name FROM gpkg_geometry_columns WHERE table_name = ?1",
        [layer],
        |row| row.get(0),
    )
    .optional()
}

/// Name of the table's integer primary key, if it has one.
fn primary_key(conn: &Connection, layer: &str) -> rusqlite::Result<Option<String>> {
    let sql = format!("PRAGMA table_info({})", quote_ident(layer));
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query([])?;

    while let Some(row) = rows.next()? {
        let pk: i64 = row.get("pk")?;
        if pk > 0 {
            return row.get("name").map(Some);
        }
    }
    Ok(None)
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn decode_geometry(value: ValueRef<'_>) -> Result<Option<geojson::Geometry>, GeometryError> {
    match value {
        ValueRef::Null => Ok(None),
        ValueRef::Blob(blob) => decode_gpkg(blob),
        _ => Err(GeometryError::NotABlob),
    }
}

fn json_value(value: ValueRef<'_>) -> serde_json::Value {
    match value {
        ValueRef::Null | ValueRef::Blob(_) => serde_json::Value::Null,
        ValueRef::Integer(i) => i.into(),
        ValueRef::Real(f) => serde_json::Number::from_f64(f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        ValueRef::Text(bytes) => String::from_utf8_lossy(bytes).into_owned().into(),
    }
}
