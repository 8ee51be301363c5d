//! Information gathering: framework, versions, companion packages, hosts.

mod framework;
mod host_header;
mod laravel_version;
mod livewire;
mod php_version;
mod subdomains;

pub use framework::FrameworkDetection;
pub use host_header::HostHeaderInjection;
pub use laravel_version::{guess_laravel_range, LaravelVersion};
pub use livewire::Livewire;
pub use php_version::PhpVersion;
pub use subdomains::{SubdomainEnumeration, DEFAULT_LOOKUP_DELAY};
