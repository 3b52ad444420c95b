//! List commands implementation

use crate::hosts;

/// List all supported hosts
pub fn list_hosts() {
    print!("{}", hosts::host_help());
}
