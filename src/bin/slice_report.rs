//! Slice report utility
//!
//! Loads a level light manifest, places a camera and prints how the lights
//! fall into slices for that single frame.
//!
//! Usage:
//!     slice_report [OPTIONS] <MANIFEST>
//!
//! Options:
//!     -c, --config <FILE>     Lighting config JSON (default: built-in defaults)
//!     --pos <X,Y,Z>           Camera position (default: 0,0,0)
//!     --target <X,Y,Z>        Point the camera looks at (default: 0,0,-1)
//!     --fov <DEG>             Horizontal field of view (default: 90)
//!     --size <WxH>            Viewport size (default: 1920x1080)
//!     --gpu                   Also create a headless device and upload the block
//!     -h, --help              Show this help message

use std::env;
use std::path::PathBuf;

use glam::Vec3;

use slicelight::core::{CameraPose, FrameDesc, LevelId};
use slicelight::lighting::{LightingConfig, SLICE_COUNT};
use slicelight::render::{FrameState, FrameSync, GpuContext};
use slicelight::scene::LevelLights;

fn print_help() {
    eprintln!("slice_report - Print the slice table for one camera placement");
    eprintln!();
    eprintln!("Usage: slice_report [OPTIONS] <MANIFEST>");
    eprintln!();
    eprintln!("Options:");
    eprintln!("    -c, --config <FILE>     Lighting config JSON (default: built-in defaults)");
    eprintln!("    --pos <X,Y,Z>           Camera position (default: 0,0,0)");
    eprintln!("    --target <X,Y,Z>        Point the camera looks at (default: 0,0,-1)");
    eprintln!("    --fov <DEG>             Horizontal field of view (default: 90)");
    eprintln!("    --size <WxH>            Viewport size (default: 1920x1080)");
    eprintln!("    --gpu                   Also create a headless device and upload the block");
    eprintln!("    -h, --help              Show this help message");
    eprintln!();
    eprintln!("Example:");
    eprintln!("    slice_report --pos 0,2,10 --target 0,2,0 ./levels/lights.json");
}

#[derive(Debug)]
struct Args {
    manifest: PathBuf,
    config: Option<PathBuf>,
    position: Vec3,
    target: Vec3,
    fov: f32,
    width: u32,
    height: u32,
    gpu: bool,
}

fn parse_vec3(value: &str) -> Result<Vec3, String> {
    let parts: Vec<f32> = value
        .split(',')
        .map(|p| p.trim().parse::<f32>().map_err(|e| format!("Invalid number '{}': {}", p, e)))
        .collect::<Result<_, _>>()?;
    match parts.as_slice() {
        [x, y, z] => Ok(Vec3::new(*x, *y, *z)),
        _ => Err(format!("Expected X,Y,Z, got '{}'", value)),
    }
}

fn parse_size(value: &str) -> Result<(u32, u32), String> {
    let (w, h) = value
        .split_once('x')
        .ok_or_else(|| format!("Expected WxH, got '{}'", value))?;
    let w = w.parse::<u32>().map_err(|e| format!("Invalid width '{}': {}", w, e))?;
    let h = h.parse::<u32>().map_err(|e| format!("Invalid height '{}': {}", h, e))?;
    Ok((w, h))
}

fn next_value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str, String> {
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| format!("Missing value for {}", flag))
}

fn parse_args() -> Result<Args, String> {
    let args: Vec<String> = env::args().skip(1).collect();

    let mut manifest: Option<PathBuf> = None;
    let mut config: Option<PathBuf> = None;
    let mut position = Vec3::ZERO;
    let mut target = -Vec3::Z;
    let mut fov = 90.0;
    let (mut width, mut height) = (1920, 1080);
    let mut gpu = false;

    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        match arg {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-c" | "--config" => config = Some(PathBuf::from(next_value(&args, &mut i, arg)?)),
            "--pos" => position = parse_vec3(next_value(&args, &mut i, arg)?)?,
            "--target" => target = parse_vec3(next_value(&args, &mut i, arg)?)?,
            "--fov" => {
                let v = next_value(&args, &mut i, arg)?;
                fov = v.parse::<f32>().map_err(|e| format!("Invalid fov '{}': {}", v, e))?;
            }
            "--size" => {
                (width, height) = parse_size(next_value(&args, &mut i, arg)?)?;
            }
            "--gpu" => gpu = true,
            other if other.starts_with('-') => return Err(format!("Unknown option: {}", other)),
            other => manifest = Some(PathBuf::from(other)),
        }
        i += 1;
    }

    let manifest = manifest.ok_or_else(|| "Missing manifest path".to_string())?;
    if position == target {
        return Err("Camera position and target must differ".to_string());
    }

    Ok(Args { manifest, config, position, target, fov, width, height, gpu })
}

fn run(args: Args) -> slicelight::core::Result<()> {
    let config = match &args.config {
        Some(path) => LightingConfig::load_sync(path)?,
        None => LightingConfig::default(),
    };
    let lights = LevelLights::load_sync(&args.manifest)?;
    log::info!("Loaded {} lights from {}", lights.len(), args.manifest.display());

    let pose = CameraPose::look_at(args.position, args.target, Vec3::Y);
    let frame = FrameDesc::new(args.fov, args.width, args.height, pose, LevelId(0));

    log::debug!("Camera forward: {:?}", pose.forward());

    let mut state = FrameState::new(config.clone())?;
    state.prepare(&frame, &lights);

    let catalog = state.catalog();
    let block = state.block();
    println!("Lights in catalog: {} (dropped {})", catalog.len(), catalog.dropped());
    println!("Lights in view cone: {}", state.partitioner().visible());
    println!("Index pool used: {} (dropped {})", state.csr_stats().used, state.csr_stats().dropped);
    println!();
    for slice in 0..SLICE_COUNT {
        let indices = block.slice(slice);
        let origins: Vec<String> = indices
            .iter()
            .filter_map(|&i| catalog.resolve(i).map(|o| format!("{}:{:?}#{}", i, o.category, o.real_index)))
            .collect();
        println!(
            "slice {:>2} [{:>4}..{:>4}) {}",
            slice,
            block.slices_first_index[slice],
            block.slices_first_index[slice + 1],
            origins.join(" ")
        );
    }

    if args.gpu {
        let ctx = pollster::block_on(GpuContext::new_headless())?;
        let mut sync = FrameSync::new(&ctx.device, config)?;
        let changes = sync.update(&ctx.queue, &frame, &lights);
        ctx.queue.submit([]);
        println!();
        println!("Uploaded frame block to GPU ({:?})", changes);
    }

    Ok(())
}

fn main() {
    slicelight::core::logging::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            print_help();
            std::process::exit(1);
        }
    };

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
