use clap::Args;
use packforge::core_types::Assignment;
use packforge::error::PfResult;
use packforge::graph::CellRecord;
use packforge::loader;
use packforge::render;

#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    /// Assignment used to color the cells; omit for a plain outline drawing
    pub solution: Option<String>,

    #[arg(short, long)]
    pub output: Option<String>,
}

pub fn run(args: RenderArgs, cells: &[CellRecord]) -> PfResult<()> {
    let (assignment, default_output) = match &args.solution {
        Some(path) => (
            loader::load_assignment(path)?,
            "battery_arrangement_grouped.svg",
        ),
        None => (Assignment::new(), "battery_arrangement.svg"),
    };
    let output = args.output.as_deref().unwrap_or(default_output);

    let size = render::write_svg(output, cells, &assignment)?;
    println!("SVG saved as {}", output);
    println!(
        "Image dimensions: {:.1} mm x {:.1} mm",
        size.width, size.height
    );
    Ok(())
}
