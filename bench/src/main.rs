//! Manual throughput benchmark for qoi-codec, modeled on the upstream
//! qoibench tool. No external harness (criterion etc.) is used, matching
//! the library's own lightweight dependency footprint.

use std::{
    fs::File,
    io::BufReader,
    path::Path,
    time::{Duration, Instant},
};

use qoi_codec::{Channels, Colorspace, Descriptor};

fn ns() -> Instant {
    Instant::now()
}

// -----------------------------------------------------------------------------
// benchmark runner

struct BenchmarkResult {
    count: u32,
    px: u64,
    w: u32,
    h: u32,
    size: u64,
    encode_time: Duration,
    decode_time: Duration,
}

impl BenchmarkResult {
    fn zero() -> Self {
        BenchmarkResult {
            count: 0,
            px: 0,
            w: 0,
            h: 0,
            size: 0,
            encode_time: Duration::ZERO,
            decode_time: Duration::ZERO,
        }
    }
}

#[inline(never)]
fn benchmark_fn(runs: u32, avg_time: &mut Duration, mut f: impl FnMut()) {
    f();

    let mut time = Duration::ZERO;
    for _ in 0..runs {
        let time_start = ns();
        f();
        time += time_start.elapsed();
    }

    *avg_time = time / runs;
}

fn benchmark_image(path: &Path, runs: u32) -> BenchmarkResult {
    let mut res = BenchmarkResult::zero();

    let image = match image::load(
        BufReader::new(File::open(path).unwrap()),
        image::ImageFormat::Png,
    ) {
        Ok(image) => image,
        Err(err) => {
            eprintln!("Failed to open PNG image {} : {:#}", path.display(), err);
            return res;
        }
    };

    let image = image.to_rgba8();

    let w = image.width();
    let h = image.height();

    res.count = 1;
    res.px = w as u64 * h as u64;
    res.w = w;
    res.h = h;

    let pixels = image.as_raw();
    let descriptor = Descriptor { width: w, height: h, channels: Channels::Rgba, colorspace: Colorspace::Srgb };

    let encoded = qoi_codec::encode(pixels, &descriptor).unwrap();

    benchmark_fn(runs, &mut res.decode_time, || {
        qoi_codec::decode(&encoded).unwrap();
    });

    benchmark_fn(runs, &mut res.encode_time, || {
        let encoded = qoi_codec::encode(pixels, &descriptor).unwrap();
        res.size = encoded.len() as u64;
    });

    res
}

fn benchmark_print_result(res: &BenchmarkResult) {
    let px = res.px as f64;
    println!("          decode ms   encode ms   decode mpps   encode mpps   size kb");
    println!(
        "qoi-codec: {:8.3}    {:8.3}      {:8.3}      {:8.3}  {:8}",
        res.decode_time.as_secs_f64() * 1000.0,
        res.encode_time.as_secs_f64() * 1000.0,
        if res.decode_time.is_zero() {
            0.0
        } else {
            px / (res.decode_time.as_secs_f64() * 1_000_000.0)
        },
        if res.encode_time.is_zero() {
            0.0
        } else {
            px / (res.encode_time.as_secs_f64() * 1_000_000.0)
        },
        res.size / 1024,
    );
    println!();
}

fn benchmark_directory(dirpath: &Path, runs: u32, grand_total: &mut BenchmarkResult) {
    println!(
        "## Benchmarking {}/*.png -- {} runs",
        dirpath.display(),
        runs
    );

    let dir = std::fs::read_dir(dirpath).expect("Couldn't open directory");

    let mut dir_total = BenchmarkResult::zero();

    for path in dir {
        let path = path.unwrap();
        let ft = path.file_type().unwrap();
        if ft.is_file() {
            let filepath = Path::new(dirpath).join(path.file_name());

            if filepath.extension().map_or(false, |e| e == "png") {
                let res = benchmark_image(&filepath, runs);

                dir_total.count += res.count;
                dir_total.px += res.px;
                dir_total.encode_time += res.encode_time;
                dir_total.decode_time += res.decode_time;
                dir_total.size += res.size;

                grand_total.count += res.count;
                grand_total.px += res.px;
                grand_total.encode_time += res.encode_time;
                grand_total.decode_time += res.decode_time;
                grand_total.size += res.size;
            }
        } else if ft.is_dir() {
            let subdirpath = Path::new(dirpath).join(path.file_name());
            benchmark_directory(&subdirpath, runs, grand_total);
        }
    }

    if dir_total.count > 0 {
        dir_total.px /= dir_total.count as u64;
        dir_total.encode_time /= dir_total.count;
        dir_total.decode_time /= dir_total.count;
        dir_total.size /= dir_total.count as u64;

        println!("## Total for {}\n", dirpath.display());
        benchmark_print_result(&dir_total);
    }
}

fn main() -> Result<(), ()> {
    let mut args = std::env::args();

    if args.len() < 3 {
        eprintln!("Usage: bench <iterations> <directory>");
        eprintln!("Example: bench 10 images/textures/");
        return Err(());
    }

    args.next();
    let mut runs = args.next().unwrap().parse().unwrap();
    if runs < 1 {
        runs = 1;
    }

    let dirpath = args.next().unwrap();

    let mut grand_total = BenchmarkResult::zero();

    benchmark_directory(dirpath.as_ref(), runs, &mut grand_total);

    println!();

    if grand_total.count > 0 {
        grand_total.px /= grand_total.count as u64;
        grand_total.encode_time /= grand_total.count;
        grand_total.decode_time /= grand_total.count;
        grand_total.size /= grand_total.count as u64;

        println!("# Grand total for {}\n", dirpath);
        benchmark_print_result(&grand_total);
    }

    Ok(())
}
