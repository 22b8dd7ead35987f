//! Command-line interface implementation

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::canvas::Canvas;
use crate::color::parse_color;
use crate::config::Config;
use crate::draw::{DrawOp, DrawPipeline};
use crate::gif::render_gif;
use crate::mirror::MirrorMode;
use crate::output::{save_png, scale_image};
use crate::painter::Tool;
use crate::payload::Payload;
use crate::spritesheet::render_spritesheet;

/// Exit codes
const EXIT_SUCCESS: u8 = 0;
const EXIT_ERROR: u8 = 1;
const EXIT_INVALID_ARGS: u8 = 2;

/// Pixelpad - frame-by-frame pixel art editing and animated GIF export
#[derive(Parser)]
#[command(name = "pxp")]
#[command(about = "Pixelpad - frame-by-frame pixel art editing and animated GIF export")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new project file
    New {
        /// Project file to create
        file: PathBuf,

        /// Canvas width in cells (1-256; default from pixelpad.toml or 32)
        #[arg(long)]
        width: Option<u32>,

        /// Canvas height in cells (1-256; default from pixelpad.toml or 32)
        #[arg(long)]
        height: Option<u32>,

        /// Number of blank frames to start with
        #[arg(long, default_value = "1")]
        frames: usize,
    },

    /// Print project dimensions and frame count
    Info {
        /// Project file to inspect
        file: PathBuf,
    },

    /// Apply draw operations to a frame and write the file back.
    ///
    /// Operations are applied grouped in this order: set, line, rect,
    /// outline, flood, pick.
    Draw {
        /// Project file to modify
        file: PathBuf,

        /// Frame index to edit (default: 0)
        #[arg(short, long)]
        frame: Option<usize>,

        /// Active color: '#RRGGBB[AA]' hex or 'transparent'
        #[arg(short, long, default_value = "#000000")]
        color: String,

        /// Brush size (1-16); the brush disk has radius size-1
        #[arg(long, default_value = "1")]
        brush_size: u32,

        /// Mirror mode applied to all operations
        #[arg(long, value_enum, default_value = "none")]
        mirror: MirrorMode,

        /// Tool for set/line/rect operations (brush, lighten, darken, ...)
        #[arg(long, value_enum, default_value = "brush")]
        tool: Tool,

        /// Erase instead of painting
        #[arg(long)]
        erase: bool,

        /// Paint the brush at a cell: x,y (repeatable)
        #[arg(long, value_name = "X,Y")]
        set: Vec<String>,

        /// Paint a line between two cells (repeatable)
        #[arg(long, value_name = "X0,Y0,X1,Y1")]
        line: Vec<String>,

        /// Paint a filled rectangle (repeatable)
        #[arg(long, value_name = "X0,Y0,X1,Y1")]
        rect: Vec<String>,

        /// Paint a rectangle outline (repeatable)
        #[arg(long, value_name = "X0,Y0,X1,Y1")]
        outline: Vec<String>,

        /// Flood fill from a seed cell (repeatable)
        #[arg(long, value_name = "X,Y")]
        flood: Vec<String>,

        /// Print the color at a cell, read-only (repeatable)
        #[arg(long, value_name = "X,Y")]
        pick: Vec<String>,

        /// Output file (default: overwrite input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Paste a payload document's first frame onto a frame of the project.
    ///
    /// The payload must match the project's canvas dimensions exactly;
    /// mismatches are rejected without touching the project.
    Import {
        /// Project file to modify
        file: PathBuf,

        /// Payload JSON to paste from
        #[arg(long, value_name = "JSON")]
        from: PathBuf,

        /// Frame index to overwrite (default: 0)
        #[arg(short, long)]
        frame: Option<usize>,
    },

    /// Frame sequence operations
    Frame {
        /// Project file to modify
        file: PathBuf,

        #[command(subcommand)]
        action: FrameAction,
    },

    /// Export a project to an image file
    Export {
        #[command(subcommand)]
        format: ExportFormat,
    },
}

#[derive(Subcommand)]
pub enum FrameAction {
    /// Insert a frame after an existing one (copies it unless --empty)
    Add {
        /// Frame to insert after (default: the last frame)
        #[arg(long)]
        at: Option<usize>,

        /// Insert a blank frame instead of duplicating
        #[arg(long)]
        empty: bool,
    },
    /// Delete a frame (the last remaining frame is kept)
    Delete {
        /// Frame to delete (default: the last frame)
        #[arg(long)]
        at: Option<usize>,
    },
    /// Blank out a frame
    Clear {
        /// Frame to clear (default: frame 0)
        #[arg(long)]
        at: Option<usize>,
    },
}

#[derive(Subcommand)]
pub enum ExportFormat {
    /// Animated GIF of every frame, looping indefinitely
    Gif {
        /// Project file to export
        file: PathBuf,

        /// Output path (default: project name with .gif)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Frames per second (default from pixelpad.toml or 8; effective
        /// maximum 50)
        #[arg(long)]
        fps: Option<u32>,
    },
    /// PNG of one frame, or a sprite sheet of all frames
    Png {
        /// Project file to export
        file: PathBuf,

        /// Output path (default: project name with .png)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Integer upscale factor (1-16; default from pixelpad.toml or 8)
        #[arg(long)]
        scale: Option<u32>,

        /// Export a single frame by index
        #[arg(long, conflicts_with = "sheet")]
        frame: Option<usize>,

        /// Export all frames as one sprite sheet
        #[arg(long)]
        sheet: bool,

        /// Sprite sheet columns (default: one row)
        #[arg(long, requires = "sheet")]
        cols: Option<u32>,
    },
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::New { file, width, height, frames } => run_new(&file, width, height, frames),
        Commands::Info { file } => run_info(&file),
        Commands::Draw {
            file,
            frame,
            color,
            brush_size,
            mirror,
            tool,
            erase,
            set,
            line,
            rect,
            outline,
            flood,
            pick,
            output,
        } => run_draw(DrawArgs {
            file,
            frame,
            color,
            brush_size,
            mirror,
            tool,
            erase,
            set,
            line,
            rect,
            outline,
            flood,
            pick,
            output,
        }),
        Commands::Import { file, from, frame } => run_import(&file, &from, frame),
        Commands::Frame { file, action } => run_frame(&file, action),
        Commands::Export { format } => match format {
            ExportFormat::Gif { file, output, fps } => run_export_gif(&file, output, fps),
            ExportFormat::Png { file, output, scale, frame, sheet, cols } => {
                run_export_png(&file, output, scale, frame, sheet, cols)
            }
        },
    }
}

/// Arguments of the draw command, bundled to keep the dispatch readable.
struct DrawArgs {
    file: PathBuf,
    frame: Option<usize>,
    color: String,
    brush_size: u32,
    mirror: MirrorMode,
    tool: Tool,
    erase: bool,
    set: Vec<String>,
    line: Vec<String>,
    rect: Vec<String>,
    outline: Vec<String>,
    flood: Vec<String>,
    pick: Vec<String>,
    output: Option<PathBuf>,
}

fn run_new(file: &Path, width: Option<u32>, height: Option<u32>, frames: usize) -> ExitCode {
    let config = match load_config_for(file) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let width = width.unwrap_or(config.canvas.width);
    let height = height.unwrap_or(config.canvas.height);

    let mut canvas = Canvas::new(width, height);
    for i in 1..frames.max(1) {
        canvas.insert_frame(i - 1, false);
    }

    let payload = Payload::from_canvas(&canvas);
    if let Err(e) = std::fs::write(file, payload.to_json()) {
        eprintln!("Error: cannot write '{}': {}", file.display(), e);
        return ExitCode::from(EXIT_ERROR);
    }
    eprintln!(
        "Created {} ({}x{}, {} frame{})",
        file.display(),
        canvas.width(),
        canvas.height(),
        canvas.len(),
        if canvas.len() == 1 { "" } else { "s" }
    );
    ExitCode::from(EXIT_SUCCESS)
}

fn run_info(file: &Path) -> ExitCode {
    let canvas = match load_project(file) {
        Ok(c) => c,
        Err(code) => return code,
    };
    println!("{}x{}, {} frame(s)", canvas.width(), canvas.height(), canvas.len());
    ExitCode::from(EXIT_SUCCESS)
}

fn run_draw(args: DrawArgs) -> ExitCode {
    let color = match parse_color(&args.color) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: --color: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let ops = match collect_ops(&args) {
        Ok(ops) => ops,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let mut pipeline = match DrawPipeline::load(&args.file, args.frame) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: cannot load '{}': {}", args.file.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let session = &mut pipeline.editor_mut().session;
    session.tool = args.tool;
    session.color = color;
    session.mirror = args.mirror;
    session.erase = args.erase;
    session.set_brush_size(args.brush_size);

    if let Err(e) = pipeline.apply_ops(&ops) {
        eprintln!("Error: {}", e);
        return ExitCode::from(EXIT_ERROR);
    }

    let target = args.output.as_deref().unwrap_or(&args.file);
    match pipeline.write_to(target) {
        Ok(result) => {
            for pick in &result.picks {
                println!("{}", pick);
            }
            if result.modified {
                eprintln!("Wrote: {}", target.display());
            }
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: cannot write '{}': {}", target.display(), e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Expand the grouped op flags into a single batch, in the documented
/// application order.
fn collect_ops(args: &DrawArgs) -> Result<Vec<DrawOp>, crate::draw::DrawError> {
    let mut ops = Vec::new();
    for arg in &args.set {
        let (x, y) = DrawOp::parse_point(arg)?;
        ops.push(DrawOp::Set { x, y });
    }
    for arg in &args.line {
        let (x0, y0, x1, y1) = DrawOp::parse_quad(arg)?;
        ops.push(DrawOp::Line { x0, y0, x1, y1 });
    }
    for arg in &args.rect {
        let (x0, y0, x1, y1) = DrawOp::parse_quad(arg)?;
        ops.push(DrawOp::Rect { x0, y0, x1, y1 });
    }
    for arg in &args.outline {
        let (x0, y0, x1, y1) = DrawOp::parse_quad(arg)?;
        ops.push(DrawOp::Outline { x0, y0, x1, y1 });
    }
    for arg in &args.flood {
        let (x, y) = DrawOp::parse_point(arg)?;
        ops.push(DrawOp::Flood { x, y });
    }
    for arg in &args.pick {
        let (x, y) = DrawOp::parse_point(arg)?;
        ops.push(DrawOp::Pick { x, y });
    }
    Ok(ops)
}

fn run_import(file: &Path, from: &Path, frame: Option<usize>) -> ExitCode {
    let mut canvas = match load_project(file) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let content = match std::fs::read_to_string(from) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: cannot open payload '{}': {}", from.display(), e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };
    let payload = match Payload::from_json(&content) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: '{}': {}", from.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    canvas.set_current(frame.unwrap_or(0));
    if let Err(e) = payload.apply_to_current(&mut canvas) {
        eprintln!("Error: import rejected: {}", e);
        return ExitCode::from(EXIT_ERROR);
    }

    let out = Payload::from_canvas(&canvas);
    if let Err(e) = std::fs::write(file, out.to_json()) {
        eprintln!("Error: cannot write '{}': {}", file.display(), e);
        return ExitCode::from(EXIT_ERROR);
    }
    eprintln!("Imported frame {} into {}", canvas.current(), file.display());
    ExitCode::from(EXIT_SUCCESS)
}

fn run_frame(file: &Path, action: FrameAction) -> ExitCode {
    let canvas = match load_project(file) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let mut editor = crate::editor::Editor::from_canvas(canvas);
    let last = editor.canvas.len() - 1;

    match action {
        FrameAction::Add { at, empty } => {
            editor.select_frame(at.unwrap_or(last));
            editor.add_frame(!empty);
            eprintln!("Added frame {} ({} total)", editor.canvas.current(), editor.canvas.len());
        }
        FrameAction::Delete { at } => {
            editor.select_frame(at.unwrap_or(last));
            if !editor.delete_frame() {
                eprintln!("No-op: the last remaining frame cannot be deleted");
                return ExitCode::from(EXIT_SUCCESS);
            }
            eprintln!("Deleted frame ({} remaining)", editor.canvas.len());
        }
        FrameAction::Clear { at } => {
            editor.select_frame(at.unwrap_or(0));
            editor.clear_frame();
            eprintln!("Cleared frame {}", editor.canvas.current());
        }
    }

    let payload = Payload::from_canvas(&editor.canvas);
    if let Err(e) = std::fs::write(file, payload.to_json()) {
        eprintln!("Error: cannot write '{}': {}", file.display(), e);
        return ExitCode::from(EXIT_ERROR);
    }
    ExitCode::from(EXIT_SUCCESS)
}

fn run_export_gif(file: &Path, output: Option<PathBuf>, fps: Option<u32>) -> ExitCode {
    let canvas = match load_project(file) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let config = match load_config_for(file) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let fps = fps.unwrap_or(config.export.fps).max(1);
    let target = output.unwrap_or_else(|| file.with_extension("gif"));

    match render_gif(canvas.frames(), fps, &target) {
        Ok(()) => {
            eprintln!("Wrote: {} ({} frames at {} fps)", target.display(), canvas.len(), fps);
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: failed to save '{}': {}", target.display(), e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn run_export_png(
    file: &Path,
    output: Option<PathBuf>,
    scale: Option<u32>,
    frame: Option<usize>,
    sheet: bool,
    cols: Option<u32>,
) -> ExitCode {
    let canvas = match load_project(file) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let config = match load_config_for(file) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let scale = scale.unwrap_or(config.export.scale);
    let target = output.unwrap_or_else(|| file.with_extension("png"));

    let image = if sheet || (frame.is_none() && canvas.len() > 1) {
        render_spritesheet(canvas.frames(), cols)
    } else {
        let i = frame.unwrap_or(0);
        match canvas.frame(i) {
            Some(f) => f.clone(),
            None => {
                eprintln!(
                    "Error: frame {} out of range (project has {} frames)",
                    i,
                    canvas.len()
                );
                return ExitCode::from(EXIT_INVALID_ARGS);
            }
        }
    };

    match save_png(&scale_image(image, scale), &target) {
        Ok(()) => {
            eprintln!("Wrote: {}", target.display());
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: failed to save '{}': {}", target.display(), e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Load and validate a project file into a canvas.
fn load_project(file: &Path) -> Result<Canvas, ExitCode> {
    let content = std::fs::read_to_string(file).map_err(|e| {
        eprintln!("Error: cannot open input file '{}': {}", file.display(), e);
        ExitCode::from(EXIT_INVALID_ARGS)
    })?;
    let payload = Payload::from_json(&content).map_err(|e| {
        eprintln!("Error: '{}': {}", file.display(), e);
        ExitCode::from(EXIT_ERROR)
    })?;
    payload.to_canvas().map_err(|e| {
        eprintln!("Error: '{}': {}", file.display(), e);
        ExitCode::from(EXIT_ERROR)
    })
}

/// Load the config governing a project file's directory.
fn load_config_for(file: &Path) -> Result<Config, ExitCode> {
    let start = file.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
    Config::load_or_default(start).map_err(|e| {
        eprintln!("Error: {}", e);
        ExitCode::from(EXIT_ERROR)
    })
}
