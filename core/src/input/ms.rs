//! Reading "ms" simulation output.
//!
//! The output of `ms` (Hudson 2002) and compatible simulators consists of an optional command
//! line, followed by one block per replicate:
//!
//! ```text
//! ms 4 2 -t 5
//! 1234 5678 9012
//!
//! //
//! segsites: 2
//! positions: 0.1 0.2
//! 00
//! 10
//! 10
//! 01
//! ```
//!
//! Each haplotype line holds the calls of one sample, one character per site. Replicates without
//! segregating sites have no positions or haplotype lines, and so can only be read if the sample
//! size is known, either from the command line or from [`Reader::set_nsam`].

use std::io;

use nom::{
    bytes::complete::{tag, take_till1},
    character::complete::{digit1, space0, space1},
    combinator::{map_res, verify},
    multi::separated_list0,
    number::complete::double,
    sequence::{preceded, tuple},
    IResult,
};

use crate::VariantMatrix;

const REPLICATE_START: &str = "//";

/// A reader of replicates in "ms" format.
#[derive(Debug)]
pub struct Reader<R> {
    inner: R,
    nsam: Option<usize>,
    buf: String,
    pending: Option<String>,
    started: bool,
    replicates: usize,
}

impl<R> Reader<R>
where
    R: io::BufRead,
{
    /// Creates a new reader.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            nsam: None,
            buf: String::new(),
            pending: None,
            started: false,
            replicates: 0,
        }
    }

    /// Returns the sample size, if known.
    pub fn nsam(&self) -> Option<usize> {
        self.nsam
    }

    /// Reads the next replicate, returning `None` when the input is exhausted.
    pub fn read_replicate(&mut self) -> io::Result<Option<VariantMatrix>> {
        loop {
            match self.read_line()? {
                Some(line) if line == REPLICATE_START => break,
                Some(line) if !self.started => {
                    self.started = true;
                    if self.nsam.is_none() {
                        if let Ok((_, nsam)) = command(&line) {
                            log::debug!("Read sample size {nsam} from command line");
                            self.nsam = Some(nsam);
                        }
                    }
                }
                Some(_) => (),
                None => return Ok(None),
            }
        }
        self.started = true;

        let segsites = match self.read_line()? {
            Some(line) => parse_complete(&line, segsites)?,
            None => return Err(invalid_data("missing segsites line after replicate start")),
        };

        let matrix = if segsites == 0 {
            let nsam = match self.nsam {
                Some(nsam) => nsam,
                None => return Err(invalid_data("unknown sample size for empty replicate")),
            };
            self.skip_empty_positions()?;
            VariantMatrix::empty(nsam).map_err(invalid_data)?
        } else {
            let positions = match self.read_line()? {
                Some(line) => parse_complete(&line, positions)?,
                None => return Err(invalid_data("missing positions line")),
            };
            if positions.len() != segsites {
                return Err(invalid_data(format!(
                    "expected {segsites} positions, found {}",
                    positions.len()
                )));
            }

            let haplotypes = self.read_haplotypes()?;
            VariantMatrix::from_haplotypes(positions, haplotypes)
                .map_err(invalid_data)?
        };

        self.replicates += 1;
        log::debug!(
            "Read replicate {} with {} sites and {} samples",
            self.replicates,
            matrix.nsites(),
            matrix.nsam()
        );

        Ok(Some(matrix))
    }

    fn read_haplotypes(&mut self) -> io::Result<Vec<String>> {
        let mut haplotypes = Vec::with_capacity(self.nsam.unwrap_or_default());

        while self.nsam.map_or(true, |nsam| haplotypes.len() < nsam) {
            match self.read_line()? {
                Some(line) if line == REPLICATE_START => {
                    self.pending = Some(line);
                    break;
                }
                Some(line) => haplotypes.push(line),
                None => break,
            }
        }

        match self.nsam {
            Some(nsam) if haplotypes.len() != nsam => Err(invalid_data(format!(
                "expected {nsam} haplotypes, found {}",
                haplotypes.len()
            ))),
            Some(_) => Ok(haplotypes),
            None => {
                self.nsam = Some(haplotypes.len());
                Ok(haplotypes)
            }
        }
    }

    /// Reads the next non-empty line with surrounding whitespace removed.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        if let Some(line) = self.pending.take() {
            return Ok(Some(line));
        }

        loop {
            self.buf.clear();
            if self.inner.read_line(&mut self.buf)? == 0 {
                return Ok(None);
            }

            let line = self.buf.trim();
            if !line.is_empty() {
                return Ok(Some(line.to_string()));
            }
        }
    }

    /// Sets the sample size.
    ///
    /// If set, this takes precedence over the sample size on the command line.
    pub fn set_nsam(mut self, nsam: usize) -> Self {
        self.nsam = Some(nsam);
        self
    }

    fn skip_empty_positions(&mut self) -> io::Result<()> {
        match self.read_line()? {
            Some(line) if line.starts_with("positions:") => Ok(()),
            line => {
                self.pending = line;
                Ok(())
            }
        }
    }
}

impl<R> Iterator for Reader<R>
where
    R: io::BufRead,
{
    type Item = io::Result<VariantMatrix>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_replicate().transpose()
    }
}

fn invalid_data<E>(e: E) -> io::Error
where
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    io::Error::new(io::ErrorKind::InvalidData, e)
}

fn parse_complete<'a, T, F>(line: &'a str, parser: F) -> io::Result<T>
where
    F: FnOnce(&'a str) -> IResult<&'a str, T>,
{
    match parser(line) {
        Ok((rest, value)) if rest.trim().is_empty() => Ok(value),
        Ok(_) | Err(_) => Err(invalid_data(format!("failed to parse line '{line}'"))),
    }
}

fn command(s: &str) -> IResult<&str, usize> {
    // A leading number is a seed line, not a program name
    let program = verify(take_till1(char::is_whitespace), |program: &str| {
        !program.chars().all(|c| c.is_ascii_digit())
    });

    preceded(tuple((program, space1)), map_res(digit1, str::parse))(s)
}

fn segsites(s: &str) -> IResult<&str, usize> {
    preceded(
        tuple((tag("segsites:"), space0)),
        map_res(digit1, str::parse),
    )(s)
}

fn positions(s: &str) -> IResult<&str, Vec<f64>> {
    preceded(
        tuple((tag("positions:"), space0)),
        separated_list0(space1, double),
    )(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: &str = "\
ms 4 3 -t 2
1234 5678 9012

//
segsites: 2
positions: 0.1000 0.2000
00
10
10
01

//
segsites: 0

//
segsites: 1
positions: 0.5
1
0
0
0
";

    #[test]
    fn test_parse_segsites() {
        assert_eq!(segsites("segsites: 12"), Ok(("", 12)));
        assert!(segsites("segsite: 12").is_err());
    }

    #[test]
    fn test_parse_positions() {
        assert_eq!(
            positions("positions: 0.0100 0.25 1"),
            Ok(("", vec![0.01, 0.25, 1.0]))
        );
        assert_eq!(positions("positions:"), Ok(("", vec![])));
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(command("ms 4 3 -t 2"), Ok((" 3 -t 2", 4)));
        assert_eq!(command("./discoal 10 1 100").map(|(_, n)| n), Ok(10));
        assert!(command("//").is_err());
        assert!(command("1234 5678 9012").is_err());
    }

    #[test]
    fn test_read_seeds_without_command_line() {
        let src = "1234 5678 9012\n\n//\nsegsites: 1\npositions: 0.5\n1\n0\n";
        let mut reader = Reader::new(src.as_bytes());

        let matrix = reader.read_replicate().unwrap().unwrap();

        assert_eq!(matrix.nsam(), 2);
        assert_eq!(matrix.as_slice(), &[1, 0]);
        assert!(reader.read_replicate().unwrap().is_none());
    }

    #[test]
    fn test_read_replicates() {
        let reader = Reader::new(MS.as_bytes());
        let replicates = reader.collect::<io::Result<Vec<_>>>().unwrap();

        assert_eq!(replicates.len(), 3);

        let expected = VariantMatrix::new(vec![0, 1, 1, 0, 0, 0, 0, 1], vec![0.1, 0.2]).unwrap();
        assert_eq!(replicates[0], expected);

        assert_eq!(replicates[1].nsites(), 0);
        assert_eq!(replicates[1].nsam(), 4);

        assert_eq!(replicates[2].as_slice(), &[1, 0, 0, 0]);
        assert_eq!(replicates[2].positions(), &[0.5]);
    }

    #[test]
    fn test_read_without_command_line() {
        let src = "//\nsegsites: 1\npositions: 0.5\n1\n0\n//\nsegsites: 1\npositions: 0.7\n0\n1\n";
        let mut reader = Reader::new(src.as_bytes());

        let first = reader.read_replicate().unwrap().unwrap();
        assert_eq!(first.nsam(), 2);
        assert_eq!(reader.nsam(), Some(2));

        let second = reader.read_replicate().unwrap().unwrap();
        assert_eq!(second.as_slice(), &[0, 1]);

        assert!(reader.read_replicate().unwrap().is_none());
    }

    #[test]
    fn test_read_no_segsites_unknown_nsam() {
        let src = "//\nsegsites: 0\n";

        assert!(Reader::new(src.as_bytes()).read_replicate().is_err());

        let matrix = Reader::new(src.as_bytes())
            .set_nsam(3)
            .read_replicate()
            .unwrap()
            .unwrap();
        assert_eq!(matrix.nsam(), 3);
    }

    #[test]
    fn test_read_too_few_haplotypes() {
        let src = "ms 3 1\n//\nsegsites: 1\npositions: 0.5\n1\n0\n";

        let result = Reader::new(src.as_bytes()).read_replicate();
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_read_position_count_mismatch() {
        let src = "ms 2 1\n//\nsegsites: 2\npositions: 0.5\n1\n0\n";

        assert!(Reader::new(src.as_bytes()).read_replicate().is_err());
    }
}
