use clap::{Parser, Subcommand};
use walkcover::app::{coverage, match_stops, suggest, walk_times};
use walkcover::config::AccessConfiguration;
use walkcover::model::error::AccessError;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct WalkcoverArguments {
    #[command(subcommand)]
    app: App,
}

#[derive(Subcommand)]
pub enum App {
    #[command(
        name = "match",
        about = "fuzzy-match school bus service stops to schools"
    )]
    Match {
        #[arg(long, help = "GeoJSON point features for school bus services")]
        services_file: String,
        #[arg(long, help = "students-distance CSV with SA1 and school columns")]
        students_file: String,
        #[arg(long, help = "output path for the stop-to-school match CSV")]
        output_file: String,
        #[arg(long, help = "path to a walkcover parameters file (.toml or .json)")]
        configuration_file: Option<String>,
    },
    #[command(
        name = "walk-times",
        about = "build the pedestrian graph and compute per-(cell, school) walking times"
    )]
    WalkTimes {
        #[arg(long, help = "pedestrian network nodes CSV (node_id,x,y), optionally gzipped")]
        nodes_file: String,
        #[arg(long, help = "pedestrian network edges CSV (src,dst[,length_m][,geometry])")]
        edges_file: String,
        #[arg(long, help = "GeoJSON point features for school bus services")]
        services_file: String,
        #[arg(long, help = "students-distance CSV with SA1 and school columns")]
        students_file: String,
        #[arg(
            long,
            default_value = "data/manual/sa1_centroids.csv",
            help = "cell centroids CSV (sa1_code_2021,lon,lat); fallback heuristic applies if absent"
        )]
        centroids_file: String,
        #[arg(long, help = "optional cell centroids GeoJSON, tried after the CSV")]
        centroids_geojson: Option<String>,
        #[arg(long, help = "output path for the walk-time CSV")]
        output_file: String,
        #[arg(long, help = "optional output path for the match table")]
        matches_file: Option<String>,
        #[arg(long, help = "optional output path for the stops GeoJSON")]
        stops_file: Option<String>,
        #[arg(long, help = "path to a walkcover parameters file (.toml or .json)")]
        configuration_file: Option<String>,
    },
    #[command(
        name = "kpis",
        about = "aggregate walk times into per-cell and per-school coverage tables"
    )]
    Kpis {
        #[arg(long, help = "walk-time CSV produced by 'walk-times'")]
        walk_times_file: String,
        #[arg(long, help = "output path for the per-cell coverage CSV")]
        by_cell_file: String,
        #[arg(long, help = "output path for the per-school coverage CSV")]
        by_school_file: String,
        #[arg(long, help = "path to a walkcover parameters file (.toml or .json)")]
        configuration_file: Option<String>,
    },
    #[command(
        name = "suggest",
        about = "propose new stop locations for underserved cells"
    )]
    Suggest {
        #[arg(long, help = "per-cell coverage CSV produced by 'kpis'")]
        kpi_by_cell_file: String,
        #[arg(long, help = "cell centroids CSV (sa1_code_2021,lon,lat)")]
        centroids_file: String,
        #[arg(long, help = "output path for the candidate stops GeoJSON")]
        output_file: String,
        #[arg(long, help = "coverage threshold in minutes; defaults to the first configured threshold")]
        threshold_min: Option<u32>,
        #[arg(long, help = "path to a walkcover parameters file (.toml or .json)")]
        configuration_file: Option<String>,
    },
}

fn load_configuration(file: &Option<String>) -> Result<AccessConfiguration, AccessError> {
    match file {
        None => Ok(AccessConfiguration::default()),
        Some(f) => {
            log::info!("reading walkcover configuration from {f}");
            AccessConfiguration::try_from(f)
        }
    }
}

pub fn run(app: &App) -> Result<(), AccessError> {
    env_logger::init();
    match app {
        App::Match {
            services_file,
            students_file,
            output_file,
            configuration_file,
        } => {
            let conf = load_configuration(configuration_file)?;
            match_stops::run(services_file, students_file, output_file, &conf)
        }
        App::WalkTimes {
            nodes_file,
            edges_file,
            services_file,
            students_file,
            centroids_file,
            centroids_geojson,
            output_file,
            matches_file,
            stops_file,
            configuration_file,
        } => {
            let conf = load_configuration(configuration_file)?;
            let args = walk_times::WalkTimesArgs {
                nodes_path: nodes_file.clone(),
                edges_path: edges_file.clone(),
                services_path: services_file.clone(),
                students_path: students_file.clone(),
                centroids_csv: centroids_file.clone(),
                centroids_geojson: centroids_geojson.clone(),
                output_path: output_file.clone(),
                matches_output: matches_file.clone(),
                stops_output: stops_file.clone(),
            };
            walk_times::run(&args, &conf)
        }
        App::Kpis {
            walk_times_file,
            by_cell_file,
            by_school_file,
            configuration_file,
        } => {
            let conf = load_configuration(configuration_file)?;
            coverage::run(walk_times_file, by_cell_file, by_school_file, &conf)
        }
        App::Suggest {
            kpi_by_cell_file,
            centroids_file,
            output_file,
            threshold_min,
            configuration_file,
        } => {
            let conf = load_configuration(configuration_file)?;
            suggest::run(
                kpi_by_cell_file,
                centroids_file,
                output_file,
                *threshold_min,
                &conf,
            )
        }
    }
}

fn main() {
    let args = WalkcoverArguments::parse();
    match run(&args.app) {
        Ok(_) => {
            eprintln!("finished.");
        }
        Err(e) => {
            log::error!("walkcover failed: {e}");
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
