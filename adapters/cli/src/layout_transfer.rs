#![allow(clippy::missing_errors_doc)]

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use lawn_defence_core::{CellCoord, PlantKind, PlantSnapshot};
use serde::{Deserialize, Serialize};

/// Leading tag of every garden string: `lawn:v1:{columns}x{rows}:{base64 json}`.
const LAYOUT_HEADER: &str = "lawn:v1";

/// Garden layout: the plants growing on a lawn of a given size.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct GardenLayout {
    /// Number of columns on the lawn.
    pub(crate) columns: u32,
    /// Number of lanes on the lawn.
    pub(crate) rows: u32,
    /// Plants composing the layout.
    pub(crate) plants: Vec<LayoutPlant>,
}

impl GardenLayout {
    /// Captures the layout of the provided plants, ordered by cell.
    #[must_use]
    pub(crate) fn from_plants(columns: u32, rows: u32, plants: &[PlantSnapshot]) -> Self {
        let mut plants: Vec<LayoutPlant> = plants
            .iter()
            .map(|plant| LayoutPlant {
                kind: plant.kind,
                cell: plant.cell,
            })
            .collect();
        plants.sort_by_key(|plant| plant.cell);
        Self {
            columns,
            rows,
            plants,
        }
    }

    /// Writes the layout as a single-line garden string.
    pub(crate) fn encode(&self) -> Result<String, LayoutTransferError> {
        let payload = Payload {
            plants: self.plants.clone(),
        };
        let json = serde_json::to_vec(&payload).map_err(LayoutTransferError::Json)?;
        let encoded = STANDARD_NO_PAD.encode(json);
        Ok(format!(
            "{LAYOUT_HEADER}:{}x{}:{encoded}",
            self.columns, self.rows
        ))
    }

    /// Reads a garden string produced by [`GardenLayout::encode`].
    pub(crate) fn decode(value: &str) -> Result<Self, LayoutTransferError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(LayoutTransferError::Blank);
        }

        let body = value
            .strip_prefix(LAYOUT_HEADER)
            .and_then(|rest| rest.strip_prefix(':'))
            .ok_or_else(|| LayoutTransferError::ForeignHeader(header_of(value)))?;
        let (size, payload) = body.split_once(':').ok_or(LayoutTransferError::Truncated)?;
        let (columns, rows) = parse_lawn_size(size)?;

        let bytes = STANDARD_NO_PAD
            .decode(payload)
            .map_err(LayoutTransferError::Base64)?;
        let Payload { plants } = serde_json::from_slice(&bytes).map_err(LayoutTransferError::Json)?;

        let layout = Self {
            columns,
            rows,
            plants,
        };
        layout.check_bounds()?;
        Ok(layout)
    }

    fn covers(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns && cell.row() < self.rows
    }

    fn check_bounds(&self) -> Result<(), LayoutTransferError> {
        match self.plants.iter().find(|plant| !self.covers(plant.cell)) {
            Some(stray) => Err(LayoutTransferError::PlantOutsideLawn(stray.cell)),
            None => Ok(()),
        }
    }
}

/// Plant description captured within a garden layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct LayoutPlant {
    /// Kind of plant growing in the cell.
    pub(crate) kind: PlantKind,
    /// Cell occupied by the plant.
    pub(crate) cell: CellCoord,
}

#[derive(Serialize, Deserialize)]
struct Payload {
    plants: Vec<LayoutPlant>,
}

/// Reasons a garden string could not be written or read.
#[derive(Debug, thiserror::Error)]
pub(crate) enum LayoutTransferError {
    /// Nothing but whitespace was supplied.
    #[error("garden string is blank")]
    Blank,
    /// The string does not start with `lawn:v1:`.
    #[error("expected a lawn:v1 garden string, found `{0}`")]
    ForeignHeader(String),
    /// The lawn size or payload section is missing.
    #[error("garden string has no COLSxROWS:PAYLOAD section")]
    Truncated,
    /// The lawn size is not two positive integers.
    #[error("lawn size `{0}` is not COLSxROWS")]
    LawnSize(String),
    /// A plant sits outside the lawn described by the layout.
    #[error("plant at column {} row {} lies outside the lawn", .0.column(), .0.row())]
    PlantOutsideLawn(CellCoord),
    /// The payload is not valid base64.
    #[error("garden payload is not base64")]
    Base64(#[source] base64::DecodeError),
    /// The plant list could not be written to or read from JSON.
    #[error("garden plant list is not valid JSON")]
    Json(#[source] serde_json::Error),
}

/// First two `:`-separated fields, used to report an unexpected header.
fn header_of(value: &str) -> String {
    value.splitn(3, ':').take(2).collect::<Vec<_>>().join(":")
}

fn parse_lawn_size(size: &str) -> Result<(u32, u32), LayoutTransferError> {
    let parsed = size.split_once('x').and_then(|(columns, rows)| {
        let columns = columns.parse::<u32>().ok()?;
        let rows = rows.parse::<u32>().ok()?;
        (columns > 0 && rows > 0).then_some((columns, rows))
    });
    parsed.ok_or_else(|| LayoutTransferError::LawnSize(size.to_owned()))
}
