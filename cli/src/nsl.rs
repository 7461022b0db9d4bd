use std::{io, path::PathBuf};

use anyhow::{Context, Error};

use clap::Parser;
use msstats_core::{input::ms, stat, Input};

/// Calculate nSL and iHS at each site of each replicate.
#[derive(Debug, Parser)]
#[clap(name = crate::NAME, about)]
pub struct Nsl {
    /// Input "ms" output.
    ///
    /// The input can be provided here or read from stdin, and may be gzip-compressed. Calls must
    /// be 0 or 1, where 1 is the derived call.
    #[clap(value_parser, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Delimiter between columns.
    #[clap(short = 'd', long, default_value_t = '\t', value_name = "CHAR")]
    pub delimiter: char,

    /// Include a header with the names of columns.
    #[clap(short = 'H', long)]
    pub header: bool,

    /// Precision to use when printing positions and statistics.
    #[clap(short = 'p', long, default_value_t = 6, value_name = "INT")]
    pub precision: usize,
}

impl Nsl {
    pub fn run(self) -> Result<(), Error> {
        let reader = Input::new(self.input.clone())?.open()?;
        let mut writer = io::stdout().lock();

        self.write_all(ms::Reader::new(reader), &mut writer)
    }

    fn write_all<R, W>(&self, mut reader: ms::Reader<R>, writer: &mut W) -> Result<(), Error>
    where
        R: io::BufRead,
        W: io::Write,
    {
        let d = self.delimiter;
        let precision = self.precision;

        if self.header {
            writeln!(writer, "replicate{d}position{d}nsl{d}ihs")?;
        }

        let mut replicates = 0;
        while let Some(matrix) = reader.read_replicate()? {
            replicates += 1;

            let values = stat::nsl(&matrix).with_context(|| {
                format!("failed to calculate nSL for replicate {replicates}")
            })?;

            for (position, value) in matrix.positions().iter().zip(values) {
                let (nsl, ihs) = (value.nsl, value.ihs);
                writeln!(
                    writer,
                    "{replicates}{d}{position:.precision$}{d}{nsl:.precision$}{d}{ihs:.precision$}"
                )?;
            }
        }

        log::info!("Processed {replicates} replicates");

        Ok(())
    }
}
