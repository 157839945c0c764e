pub mod host_helpers;
