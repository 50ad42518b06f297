//! GeoPackage fixtures for tests.

use std::path::Path;

use rusqlite::types::Value;
use rusqlite::{Connection, params_from_iter};

/// Little-endian GeoPackage blob holding a 2D point.
pub fn point_blob(x: f64, y: f64) -> Vec<u8> {
    let mut blob = gpkg_header(0x01);
    blob.push(1);
    blob.extend_from_slice(&1u32.to_le_bytes());
    blob.extend_from_slice(&x.to_le_bytes());
    blob.extend_from_slice(&y.to_le_bytes());
    blob
}

/// `POINT EMPTY` as written by GDAL: empty flag set, NaN coordinates.
pub fn empty_point_blob() -> Vec<u8> {
    let mut blob = gpkg_header(0x01 | 0x10);
    blob.push(1);
    blob.extend_from_slice(&1u32.to_le_bytes());
    blob.extend_from_slice(&f64::NAN.to_le_bytes());
    blob.extend_from_slice(&f64::NAN.to_le_bytes());
    blob
}

/// Little-endian GeoPackage blob holding a 2D line string.
pub fn line_blob(coords: &[(f64, f64)]) -> Vec<u8> {
    let mut blob = gpkg_header(0x01);
    blob.push(1);
    blob.extend_from_slice(&2u32.to_le_bytes());
    blob.extend_from_slice(&(coords.len() as u32).to_le_bytes());
    for (x, y) in coords {
        blob.extend_from_slice(&x.to_le_bytes());
        blob.extend_from_slice(&y.to_le_bytes());
    }
    blob
}

fn gpkg_header(flags: u8) -> Vec<u8> {
    let mut header = vec![b'G', b'P', 0, flags];
    header.extend_from_slice(&4326u32.to_le_bytes());
    header
}

/// Builds a single-layer GeoPackage file.
///
/// The layer gets an `fid` primary key and a `geom` geometry column ahead
/// of any extra columns.
pub struct LayerBuilder {
    layer: String,
    columns: Vec<(String, &'static str)>,
    rows: Vec<(Vec<Value>, Option<Vec<u8>>)>,
}

impl LayerBuilder {
    pub fn new(layer: &str) -> Self {
        Self {
            layer: layer.to_string(),
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn column(mut self, name: &str, sql_type: &'static str) -> Self {
        self.columns.push((name.to_string(), sql_type));
        self
    }

    pub fn row(mut self, values: Vec<Value>, geometry: Option<Vec<u8>>) -> Self {
        self.rows.push((values, geometry));
        self
    }

    /// Write the layer, creating the file and registry table if needed.
    pub fn write(&self, path: &Path) {
        let conn = Connection::open(path).unwrap();
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS gpkg_geometry_columns (
                table_name TEXT NOT NULL,
                column_name TEXT NOT NULL,
                geometry_type_name TEXT NOT NULL,
                srs_id INTEGER NOT NULL,
                z TINYINT NOT NULL,
                m TINYINT NOT NULL
            );",
        )
        .unwrap();

        let mut ddl = format!(
            "CREATE TABLE \"{}\" (fid INTEGER PRIMARY KEY AUTOINCREMENT, geom BLOB",
            self.layer
        );
        for (name, sql_type) in &self.columns {
            ddl.push_str(&format!(", \"{name}\" {sql_type}"));
        }
        ddl.push_str(");");
        conn.execute_batch(&ddl).unwrap();

        conn.execute(
            "INSERT INTO gpkg_geometry_columns VALUES (?1, 'geom', 'GEOMETRY', 4326, 0, 0)",
            [&self.layer],
        )
        .unwrap();

        let placeholders: Vec<String> = (1..=self.columns.len() + 1)
            .map(|i| format!("?{i}"))
            .collect();
        let mut names = vec!["geom".to_string()];
        names.extend(self.columns.iter().map(|(name, _)| format!("\"{name}\"")));
        let insert = format!(
            "INSERT INTO \"{}\" ({}) VALUES ({})",
            self.layer,
            names.join(", "),
            placeholders.join(", ")
        );

        for (values, geometry) in &self.rows {
            let mut params = vec![geometry.clone().map_or(Value::Null, Value::Blob)];
            params.extend(values.iter().cloned());
            conn.execute(&insert, params_from_iter(params)).unwrap();
        }
    }
}

/// A station row: optional `name`, optional `nazwa`, optional (lon, lat).
pub type StationRow<'a> = (Option<&'a str>, Option<&'a str>, Option<(f64, f64)>);

/// Write a `stations` layer with `name` and `nazwa` columns.
pub fn write_stations(path: &Path, rows: &[StationRow<'_>]) {
    let text = |s: Option<&str>| s.map_or(Value::Null, |s| Value::Text(s.to_string()));
    rows.iter()
        .fold(
            LayerBuilder::new("stations")
                .column("name", "TEXT")
                .column("nazwa", "TEXT"),
            |builder, (name, nazwa, position)| {
                builder.row(
                    vec![text(*name), text(*nazwa)],
                    position.map(|(lon, lat)| point_blob(lon, lat)),
                )
            },
        )
        .write(path);
}

/// Write a `railway` layer with a `line_no` column.
pub fn write_railway(path: &Path, lines: &[(i64, &[(f64, f64)])]) {
    lines
        .iter()
        .fold(
            LayerBuilder::new("railway").column("line_no", "INTEGER"),
            |builder, (line_no, coords)| {
                builder.row(vec![Value::Integer(*line_no)], Some(line_blob(coords)))
            },
        )
        .write(path);
}
