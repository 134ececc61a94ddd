use log::LevelFilter;
use meridian_core::host::Host;
use meridian_site::{config, nav, router_config, routes};
use meridian_web::WebHost;

fn main() {
    console_error_panic_hook::set_once();

    let Some(host) = WebHost::new() else {
        eprintln!("meridian-site runs in a browser, build it for wasm32-unknown-unknown");
        return;
    };
    if let Err(err) = meridian_web::init_logging(LevelFilter::Info) {
        eprintln!("logging disabled: {err}");
    }

    match host.element_by_id(config::HEADER_ID) {
        Some(header) => header.append(&nav::header()),
        None => log::warn!("no `#{}` element, navigation not shown", config::HEADER_ID),
    }

    let router = meridian_web::run(host.clone(), routes(&host), router_config());
    log::info!("serving {} routes", router.routes().len());
}
