use std::env;

use light_sweep::{LightResistor, LightSource, LightingAlgorithm, Point2, SweepLightAlgorithm};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = match Args::parse(env::args().skip(1)) {
        Ok(v) => v,
        Err(msg) => {
            if !msg.is_empty() {
                eprintln!("错误：{msg}");
                eprintln!();
            }
            eprintln!("{}", Args::usage());
            std::process::exit(2);
        }
    };

    if let Err(msg) = run(args) {
        eprintln!("错误：{msg}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), String> {
    let mut algorithm = SweepLightAlgorithm::new();
    if let Some(parts) = args.parts {
        algorithm
            .set_parts_num(parts)
            .map_err(|e| format!("--parts 无效：{e}"))?;
    }
    for (i, resistor) in args.resistors.into_iter().enumerate() {
        algorithm
            .add_resistor(resistor)
            .map_err(|e| format!("第 {i} 个 --resistor 无效：{e}"))?;
    }

    let out = algorithm
        .compute_visibility_polygon(&args.light)
        .map_err(|e| format!("计算失败：{e}"))?;

    for w in &out.warnings {
        eprintln!("告警：{w}");
    }
    for p in &out.polygon {
        println!("{} {}", p.x, p.y);
    }
    Ok(())
}

#[derive(Clone, Debug)]
struct Args {
    light: LightSource,
    resistors: Vec<LightResistor>,
    parts: Option<usize>,
}

impl Args {
    fn parse<I>(args: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = String>,
    {
        let mut light: Option<LightSource> = None;
        let mut resistors = Vec::new();
        let mut parts: Option<usize> = None;

        let mut it = args.into_iter();
        while let Some(arg) = it.next() {
            match arg.as_str() {
                "-h" | "--help" => {
                    return Err(String::new());
                }
                "--light" => {
                    let Some(v) = it.next() else {
                        return Err("--light 缺少参数".to_string());
                    };
                    let values = parse_numbers(&v, "--light")?;
                    let &[x, y, intensity] = values.as_slice() else {
                        return Err(format!("--light 需要 3 个数（x,y,intensity），实际为：{v}"));
                    };
                    light = Some(LightSource::new(x, y, intensity));
                }
                "--resistor" => {
                    let Some(v) = it.next() else {
                        return Err("--resistor 缺少参数".to_string());
                    };
                    resistors.push(parse_resistor(&v)?);
                }
                "--parts" => {
                    let Some(v) = it.next() else {
                        return Err("--parts 缺少参数".to_string());
                    };
                    parts = Some(
                        v.parse::<usize>()
                            .map_err(|_| "--parts 必须是非负整数".to_string())?,
                    );
                }
                _ => {
                    return Err(format!("未知参数：{arg}"));
                }
            }
        }

        let Some(light) = light else {
            return Err("必须提供 --light".to_string());
        };

        Ok(Self {
            light,
            resistors,
            parts,
        })
    }

    fn usage() -> &'static str {
        "用法：cargo run --bin light-polygon -- --light <x,y,intensity> [--resistor <x,y;x,y;...>]... [--parts N]\n\
\n\
说明：\n\
- 每行输出一个多边形顶点 `x y`（世界坐标，按相对光源的极角升序）。\n\
- 告警与日志写到 stderr；日志级别由 RUST_LOG 控制。\n\
\n\
示例：\n\
- cargo run --bin light-polygon -- --light 320,240,300 --resistor \"340,220;340,200;300,200;300,220\"\n"
    }
}

fn parse_numbers(text: &str, flag: &str) -> Result<Vec<f64>, String> {
    text.split(',')
        .map(|s| {
            s.trim()
                .parse::<f64>()
                .map_err(|_| format!("{flag} 中的 `{}` 不是数字", s.trim()))
        })
        .collect()
}

fn parse_resistor(text: &str) -> Result<LightResistor, String> {
    let mut vertices = Vec::new();
    for pair in text.split(';').filter(|s| !s.trim().is_empty()) {
        let values = parse_numbers(pair, "--resistor")?;
        let &[x, y] = values.as_slice() else {
            return Err(format!("--resistor 的顶点需要 2 个数（x,y），实际为：{pair}"));
        };
        vertices.push(Point2::new(x, y));
    }
    Ok(LightResistor::from_vertices(vertices))
}
