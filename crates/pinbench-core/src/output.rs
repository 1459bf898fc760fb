use crate::grid::OccupancyGrid;
use std::fmt::Write;

pub const BENCH_FILE_PREFIX: &str = "bench_";
pub const BENCH_FILE_SUFFIX: &str = ".xml";
pub const IMAGE_FILE_PREFIX: &str = "img_";
pub const IMAGE_FILE_SUFFIX: &str = ".txt";

/// Shared stem of both output files, e.g. `n4_m2_k1`.
pub fn instance_stem(grid_size: usize, pins: usize, repetition: usize) -> String {
    format!("n{grid_size}_m{pins}_k{repetition}")
}

pub fn bench_file_name(stem: &str) -> String {
    format!("{BENCH_FILE_PREFIX}{stem}{BENCH_FILE_SUFFIX}")
}

pub fn image_file_name(stem: &str) -> String {
    format!("{IMAGE_FILE_PREFIX}{stem}{IMAGE_FILE_SUFFIX}")
}

/// XML net description: header, one `<point>` per pin in scan order, footer.
pub fn render_bench(grid: &OccupancyGrid) -> String {
    let pins = grid.occupied_count();
    let mut out = String::with_capacity(64 + pins * 56);
    // Writing into a String cannot fail.
    let _ = writeln!(
        out,
        "<net grid_size=\"{}\" pin_count=\"{pins}\">",
        grid.size()
    );
    for (x, y) in grid.occupied_cells() {
        let _ = writeln!(
            out,
            "    <point x=\"{x}\" y=\"{y}\" layer=\"pins\" type=\"pin\" />"
        );
    }
    out.push_str("</net>\n");
    out
}

/// One line per row, `#` for a pin and `.` for a free cell.
pub fn render_image(grid: &OccupancyGrid) -> String {
    let size = grid.size();
    let mut out = String::with_capacity(size * (size + 1));
    for row in grid.rows() {
        out.extend(row.iter().map(|&c| if c { '#' } else { '.' }));
        out.push('\n');
    }
    out
}
