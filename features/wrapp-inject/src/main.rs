use std::{env, sync::Arc};

use tracing_subscriber::EnvFilter;
use wrapp_inject::{Dep, Pool, ResolveMode};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mode = match env::args()
        .nth(1)
        .or_else(|| env::var("WRAPP_INJECT_MODE").ok())
        .map(|mode| mode.parse::<ResolveMode>())
        .transpose()
    {
        Ok(mode) => mode.unwrap_or_default(),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };

    let mut pool = Pool::new();
    pool.add_instance(Arc::new(Settings {
        greeting: "hello".to_string(),
    }))
    .add_factory(new_greeter)
    .add_factory(new_audience);

    if let Err(e) = pool.resolve(mode) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    println!("{:?}", pool);
    match pool.require::<Dep<Greeter>>() {
        Ok(greeter) => println!("{}", greeter.read().greet()),
        Err(e) => eprintln!("{e}"),
    }
}

#[derive(Debug)]
struct Settings {
    greeting: String,
}

/// Greeter and Audience know each other - only tolerant resolution can wire them
#[derive(Debug)]
struct Greeter {
    settings: Arc<Settings>,
    audience: Dep<Audience>,
}
impl Greeter {
    fn greet(&self) -> String {
        format!("{} {}", self.settings.greeting, self.audience.read().name)
    }
}

#[derive(Debug)]
struct Audience {
    name: String,
    _greeter: Dep<Greeter>,
}

fn new_greeter(settings: Arc<Settings>, audience: Dep<Audience>) -> Dep<Greeter> {
    Dep::new(Greeter { settings, audience })
}

fn new_audience(greeter: Dep<Greeter>) -> Dep<Audience> {
    Dep::new(Audience {
        name: "world".to_string(),
        _greeter: greeter,
    })
}
