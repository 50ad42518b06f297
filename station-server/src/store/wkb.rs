//! GeoPackage binary geometry decoding.
//!
//! A GeoPackage geometry blob is a small header (magic, version, flags,
//! SRS id, optional envelope) followed by a WKB geometry. Both ISO
//! (`+1000`/`+2000`/`+3000`) and EWKB (high-bit) dimension encodings are
//! accepted. Z values are kept; M values are dropped.

use geojson::{Geometry, Position, Value};

use super::error::GeometryError;

const MAGIC: &[u8; 2] = b"GP";
const FLAG_LITTLE_ENDIAN: u8 = 0x01;
const FLAG_EMPTY: u8 = 0x10;

const EWKB_Z: u32 = 0x8000_0000;
const EWKB_M: u32 = 0x4000_0000;
const EWKB_SRID: u32 = 0x2000_0000;

const POINT: u32 = 1;
const LINE_STRING: u32 = 2;
const POLYGON: u32 = 3;
const MULTI_POINT: u32 = 4;
const MULTI_LINE_STRING: u32 = 5;
const MULTI_POLYGON: u32 = 6;
const GEOMETRY_COLLECTION: u32 = 7;

/// Deepest geometry collection nesting we decode.
const MAX_DEPTH: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ByteOrder {
    Big,
    Little,
}

#[derive(Debug, Clone, Copy)]
struct Dims {
    z: bool,
    m: bool,
}

impl Dims {
    fn len(self) -> usize {
        2 + usize::from(self.z) + usize::from(self.m)
    }
}

/// Forward-only cursor over a byte slice.
struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], GeometryError> {
        if self.remaining() < n {
            return Err(GeometryError::Truncated);
        }
        let bytes = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    fn array<const N: usize>(&mut self) -> Result<[u8; N], GeometryError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    fn u8(&mut self) -> Result<u8, GeometryError> {
        Ok(self.take(1)?[0])
    }

    fn u32(&mut self, order: ByteOrder) -> Result<u32, GeometryError> {
        let bytes = self.array::<4>()?;
        Ok(match order {
            ByteOrder::Big => u32::from_be_bytes(bytes),
            ByteOrder::Little => u32::from_le_bytes(bytes),
        })
    }

    fn f64(&mut self, order: ByteOrder) -> Result<f64, GeometryError> {
        let bytes = self.array::<8>()?;
        Ok(match order {
            ByteOrder::Big => f64::from_be_bytes(bytes),
            ByteOrder::Little => f64::from_le_bytes(bytes),
        })
    }

    /// Read an element count, rejecting counts the rest of the blob can't hold.
    fn count(&mut self, order: ByteOrder, min_item_len: usize) -> Result<usize, GeometryError> {
        let n = self.u32(order)? as usize;
        if n.saturating_mul(min_item_len) > self.remaining() {
            return Err(GeometryError::Truncated);
        }
        Ok(n)
    }
}

/// Decode a GeoPackage geometry blob.
///
/// Returns `Ok(None)` for geometries flagged empty in the header and for
/// WKB geometries with no coordinates (e.g. `POINT EMPTY` encoded as NaN).
pub fn decode_gpkg(blob: &[u8]) -> Result<Option<Geometry>, GeometryError> {
    let mut r = Reader::new(blob);

    if &r.array::<2>()? != MAGIC {
        return Err(GeometryError::BadMagic);
    }
    let _version = r.u8()?;
    let flags = r.u8()?;

    let order = if flags & FLAG_LITTLE_ENDIAN != 0 {
        ByteOrder::Little
    } else {
        ByteOrder::Big
    };
    let envelope_len = match (flags >> 1) & 0x07 {
        0 => 0,
        1 => 32,
        2 | 3 => 48,
        4 => 64,
        other => return Err(GeometryError::InvalidEnvelope(other)),
    };

    let _srs_id = r.u32(order)?;
    r.take(envelope_len)?;

    if flags & FLAG_EMPTY != 0 {
        return Ok(None);
    }

    let value = read_geometry(&mut r, 0)?;
    if is_empty(&value) {
        return Ok(None);
    }
    Ok(Some(Geometry::new(value)))
}

/// Human-readable GeoJSON type name of a geometry value.
pub fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Point(_) => "Point",
        Value::MultiPoint(_) => "MultiPoint",
        Value::LineString(_) => "LineString",
        Value::MultiLineString(_) => "MultiLineString",
        Value::Polygon(_) => "Polygon",
        Value::MultiPolygon(_) => "MultiPolygon",
        Value::GeometryCollection(_) => "GeometryCollection",
    }
}

fn point_is_empty(position: &[f64]) -> bool {
    position.iter().take(2).any(|c| c.is_nan())
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Point(p) => point_is_empty(p),
        Value::MultiPoint(ps) => ps.is_empty(),
        Value::LineString(ps) => ps.is_empty(),
        Value::MultiLineString(ls) => ls.is_empty(),
        Value::Polygon(rings) => rings.is_empty(),
        Value::MultiPolygon(polys) => polys.is_empty(),
        Value::GeometryCollection(gs) => gs.is_empty(),
    }
}

/// Read a WKB header, returning byte order, base type code and dimensions.
fn read_header(r: &mut Reader<'_>) -> Result<(ByteOrder, u32, Dims), GeometryError> {
    let order = match r.u8()? {
        0 => ByteOrder::Big,
        1 => ByteOrder::Little,
        other => return Err(GeometryError::InvalidByteOrder(other)),
    };
    let raw = r.u32(order)?;
    if raw & EWKB_SRID != 0 {
        let _srid = r.u32(order)?;
    }

    let iso = raw & 0x0FFF_FFFF;
    let (base, iso_z, iso_m) = match iso / 1000 {
        0 => (iso, false, false),
        1 => (iso % 1000, true, false),
        2 => (iso % 1000, false, true),
        3 => (iso % 1000, true, true),
        _ => return Err(GeometryError::UnknownType(raw)),
    };
    let dims = Dims {
        z: iso_z || raw & EWKB_Z != 0,
        m: iso_m || raw & EWKB_M != 0,
    };
    Ok((order, base, dims))
}

fn read_geometry(r: &mut Reader<'_>, depth: usize) -> Result<Value, GeometryError> {
    if depth > MAX_DEPTH {
        return Err(GeometryError::TooDeep(MAX_DEPTH));
    }
    let (order, base, dims) = read_header(r)?;
    read_body(r, order, base, dims, depth)
}

fn read_body(
    r: &mut Reader<'_>,
    order: ByteOrder,
    base: u32,
    dims: Dims,
    depth: usize,
) -> Result<Value, GeometryError> {
    let value = match base {
        POINT => Value::Point(read_position(r, order, dims)?),
        LINE_STRING => Value::LineString(read_positions(r, order, dims)?),
        POLYGON => Value::Polygon(read_rings(r, order, dims)?),
        MULTI_POINT => {
            let points = read_members(r, order, POINT, "Point", depth)?
                .into_iter()
                .filter_map(|v| match v {
                    Value::Point(p) if !point_is_empty(&p) => Some(p),
                    _ => None,
                })
                .collect();
            Value::MultiPoint(points)
        }
        MULTI_LINE_STRING => {
            let lines = read_members(r, order, LINE_STRING, "LineString", depth)?
                .into_iter()
                .filter_map(|v| match v {
                    Value::LineString(ps) => Some(ps),
                    _ => None,
                })
                .collect();
            Value::MultiLineString(lines)
        }
        MULTI_POLYGON => {
            let polygons = read_members(r, order, POLYGON, "Polygon", depth)?
                .into_iter()
                .filter_map(|v| match v {
                    Value::Polygon(rings) => Some(rings),
                    _ => None,
                })
                .collect();
            Value::MultiPolygon(polygons)
        }
        GEOMETRY_COLLECTION => {
            let n = r.count(order, 5)?;
            let mut members = Vec::with_capacity(n);
            for _ in 0..n {
                let member = read_geometry(r, depth + 1)?;
                if !is_empty(&member) {
                    members.push(Geometry::new(member));
                }
            }
            Value::GeometryCollection(members)
        }
        other => return Err(GeometryError::UnknownType(other)),
    };
    Ok(value)
}

/// Read the members of a multi-geometry, each of which must be `expected`.
fn read_members(
    r: &mut Reader<'_>,
    order: ByteOrder,
    expected: u32,
    expected_name: &'static str,
    depth: usize,
) -> Result<Vec<Value>, GeometryError> {
    let n = r.count(order, 5)?;
    let mut members = Vec::with_capacity(n);
    for _ in 0..n {
        let (member_order, base, dims) = read_header(r)?;
        if base != expected {
            return Err(GeometryError::UnexpectedMember {
                expected: expected_name,
                found: base,
            });
        }
        members.push(read_body(r, member_order, base, dims, depth + 1)?);
    }
    Ok(members)
}

fn read_position(
    r: &mut Reader<'_>,
    order: ByteOrder,
    dims: Dims,
) -> Result<Position, GeometryError> {
    let x = r.f64(order)?;
    let y = r.f64(order)?;
    let mut position = vec![x, y];
    if dims.z {
        position.push(r.f64(order)?);
    }
    if dims.m {
        let _m = r.f64(order)?;
    }
    Ok(position)
}

fn read_positions(
    r: &mut Reader<'_>,
    order: ByteOrder,
    dims: Dims,
) -> Result<Vec<Position>, GeometryError> {
    let n = r.count(order, dims.len() * 8)?;
    (0..n).map(|_| read_position(r, order, dims)).collect()
}

fn read_rings(
    r: &mut Reader<'_>,
    order: ByteOrder,
    dims: Dims,
) -> Result<Vec<Vec<Position>>, GeometryError> {
    let n = r.count(order, 4)?;
    (0..n).map(|_| read_positions(r, order, dims)).collect()
}
