//! Regulon set writers.

use std::io::Write;

use regulon_common::Result;

use crate::regulon::RegulonSet;

/// Pretty-printed JSON of the whole set, parameters included.
pub fn write_json<W: Write>(set: &RegulonSet, writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, set)?;
    Ok(())
}

/// One tab-separated row per retained edge, in input row order.
pub fn write_tsv<W: Write>(set: &RegulonSet, writer: W) -> Result<()> {
    let mut out = csv::WriterBuilder::new().delimiter(b'\t').from_writer(writer);
    out.write_record(["regulator", "target", "score", "sign", "association"])?;
    for (regulator, edge) in set.edges() {
        let score = edge.score.to_string();
        let association = edge.association.map(|a| a.to_string()).unwrap_or_default();
        out.write_record([
            regulator,
            edge.target.as_str(),
            score.as_str(),
            edge.sign.as_str(),
            association.as_str(),
        ])?;
    }
    out.flush()?;
    Ok(())
}
