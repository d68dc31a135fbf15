use api::App;
use db::{Config, Database};
use hyper::{server::conn::http1, service::service_fn};
use hyper_util::rt::TokioIo;
use std::{
    convert::Infallible,
    env,
    net::{Ipv4Addr, SocketAddr},
    sync::Arc,
};
use tokio::{net::TcpListener, runtime::Runtime};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Parse environment variables
    let port = env::var("PORT")?.parse()?;
    let user = env::var("PG_USERNAME")?;
    let pass = env::var("PG_PASSWORD")?;
    let host = env::var("PG_HOSTNAME")?;
    let data = env::var("PG_DATABASE")?;
    let pg_port = match env::var("PG_PORT") {
        Ok(port) => port.parse()?,
        _ => 5432,
    };
    let pool_size = match env::var("PG_POOL_SIZE") {
        Ok(size) => size.parse()?,
        _ => 16,
    };

    // Set up the connection pool
    let mut config = Config::new();
    config.user(&user).password(&pass).host(&host).dbname(&data).port(pg_port);
    let db = Database::connect(config, pool_size)?;

    let runtime = Runtime::new()?;
    runtime.block_on(db.init_schema())?;
    log::info!("Database schema is ready.");

    let app = Arc::new(App::new(db));
    let addr: SocketAddr = (Ipv4Addr::UNSPECIFIED, port).into();
    runtime.block_on(serve(addr, app))
}

async fn serve(addr: SocketAddr, app: Arc<App<Database>>) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    log::info!("Listening on {addr}.");

    let mut stop = core::pin::pin!(tokio::signal::ctrl_c());
    loop {
        let (stream, peer) = tokio::select! {
            biased;
            res = &mut stop => {
                res?;
                log::info!("Received Ctrl-C. Shutting down.");
                return Ok(());
            }
            res = listener.accept() => match res {
                Ok(pair) => pair,
                Err(err) => {
                    log::error!("Failed to accept connection: {err}");
                    continue;
                }
            },
        };

        let outer = app.clone();
        tokio::spawn(async move {
            let service = service_fn(move |req| {
                let inner = outer.clone();
                async move { Ok::<_, Infallible>(inner.respond(req).await) }
            });
            if let Err(err) = http1::Builder::new().serve_connection(TokioIo::new(stream), service).await {
                log::error!("Connection with {peer} failed: {err}");
            }
        });
    }
}
