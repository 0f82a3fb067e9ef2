use warshall_engine::solve_params::Strategy;

/// Parses a tile size as `ROWSxCOLS`, or a single number for square tiles.
pub fn parse_tile(input: &str) -> Result<Strategy, String> {
    let parse_dimension = |value: &str| -> Result<usize, String> {
        match value.trim().parse::<usize>() {
            Ok(0) => Err(String::from("Tile dimensions must be at least 1")),
            Ok(value) => Ok(value),
            Err(_) => Err(format!("Invalid tile dimension: {value}")),
        }
    };

    let (rows, cols) = match input.split_once(['x', 'X']) {
        Some((rows, cols)) => (parse_dimension(rows)?, parse_dimension(cols)?),
        None => {
            let size = parse_dimension(input)?;
            (size, size)
        }
    };

    Ok(Strategy::Tiled {
        tile_rows: rows,
        tile_cols: cols,
    })
}
