use app_info::build_info::{self, BuildInfo};
use app_info::util::config::ConfigLoader;
use app_info::util::log::log_init_with_config;
use app_info::util::logging::standards::events;

const USAGE: &str = "usage: app-info [about|version|build|help]

  about      print name, identifier, version, build and provenance (default)
  version    print a one-line version summary (also --version, -V)
  build      print the build number (also --build)
  help       print this message (also --help, -h)";

fn main() -> anyhow::Result<()> {
    let config_path = ConfigLoader::config_path();
    let config = ConfigLoader::load(&config_path)?;
    let guard = log_init_with_config("app-info", &config.logging)?;
    tracing::debug!(
        event = events::CONFIG_LOADED,
        path = %config_path.display(),
        from_file = config_path.exists()
    );

    let mut args = std::env::args();
    let _ = args.next();

    let info = BuildInfo::current();
    match args.next().as_deref() {
        None | Some("about") => {
            build_info::log_build_info();
            println!("{}", info.about_screen());
        }
        Some("version") | Some("--version") | Some("-V") => {
            println!("{}", build_info::summary());
        }
        Some("build") | Some("--build") => {
            println!("{}", info.build());
        }
        Some("help") | Some("--help") | Some("-h") => {
            println!("{USAGE}");
        }
        Some(other) => {
            tracing::warn!(argument = other, "unknown argument");
            eprintln!("{USAGE}");
            drop(guard);
            std::process::exit(2);
        }
    }

    Ok(())
}
