use crate::error::{MapError, MapResult};
use crate::grid::{Mark, MarkGrid};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Extension required for map files
pub const EXTENSION: &str = "tanmimap";

fn check_extension(path: &Path) -> MapResult<()> {
    match path.extension() {
        Some(ext) if ext == EXTENSION => Ok(()),
        _ => Err(MapError::InvalidOutputTarget {
            path: path.to_path_buf(),
        }),
    }
}

/// Write a grid to a `.tanmimap` file
///
/// The first line holds `width height mark_count`, followed by one line per
/// `x` with that row's `height` marks separated by spaces.
///
/// # Arguments
/// * `grid` - The grid to save
/// * `path` - Destination, must end in `.tanmimap`
///
/// # Returns
/// * `MapResult<()>` - `InvalidOutputTarget` for a wrong extension, `Io` on write failure
pub fn write_tanmimap(grid: &MarkGrid, path: impl AsRef<Path>) -> MapResult<()> {
    let path = path.as_ref();
    check_extension(path)?;

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "{} {} {}", grid.width(), grid.height(), grid.mark_count())?;
    write!(writer, "{}", grid)?;
    writer.flush()?;

    log::info!("wrote {}x{} map to {}", grid.width(), grid.height(), path.display());
    Ok(())
}

fn parse_numbers(line: &str, line_no: usize) -> MapResult<Vec<u64>> {
    line.split_whitespace()
        .map(|token| {
            token.parse::<u64>().map_err(|_| MapError::Parse {
                line: line_no,
                reason: format!("'{}' is not a non-negative integer", token),
            })
        })
        .collect()
}

/// Read a grid back from a `.tanmimap` file
pub fn read_tanmimap(path: impl AsRef<Path>) -> MapResult<MarkGrid> {
    let path = path.as_ref();
    check_extension(path)?;

    let reader = BufReader::new(File::open(path)?);
    let mut lines = reader
        .lines()
        .enumerate()
        .map(|(i, line)| line.map(|l| (i + 1, l)));

    let (header_no, header) = lines.next().transpose()?.ok_or(MapError::Parse {
        line: 1,
        reason: "missing header".to_string(),
    })?;
    let dims = parse_numbers(&header, header_no)?;
    let &[width, height, mark_count] = dims.as_slice() else {
        return Err(MapError::Parse {
            line: header_no,
            reason: format!("expected 'width height mark_count', got {} values", dims.len()),
        });
    };

    let header_error = |reason: String| MapError::Parse {
        line: header_no,
        reason,
    };
    let width = usize::try_from(width).map_err(|_| header_error(format!("width {} is too large", width)))?;
    let height =
        usize::try_from(height).map_err(|_| header_error(format!("height {} is too large", height)))?;
    let mark_count = Mark::try_from(mark_count)
        .map_err(|_| header_error(format!("mark count {} is too large", mark_count)))?;

    let mut grid = MarkGrid::new(width, height, mark_count).map_err(|e| header_error(e.to_string()))?;

    let mut x = 0;
    let mut last_line = header_no;
    for line in lines {
        let (line_no, line) = line?;
        last_line = line_no;
        if line.trim().is_empty() {
            continue;
        }
        if x >= grid.width() {
            return Err(MapError::Parse {
                line: line_no,
                reason: format!("more than {} rows", grid.width()),
            });
        }

        let values = parse_numbers(&line, line_no)?;
        if values.len() != grid.height() {
            return Err(MapError::Parse {
                line: line_no,
                reason: format!("expected {} values, got {}", grid.height(), values.len()),
            });
        }
        for (y, &value) in values.iter().enumerate() {
            if value >= u64::from(grid.mark_count()) {
                return Err(MapError::Parse {
                    line: line_no,
                    reason: format!("mark {} is outside [0, {})", value, mark_count),
                });
            }
            grid.set(x, y, value as Mark);
        }
        x += 1;
    }

    if x != grid.width() {
        return Err(MapError::Parse {
            line: last_line,
            reason: format!("expected {} rows, got {}", grid.width(), x),
        });
    }
    Ok(grid)
}
