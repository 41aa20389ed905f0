/// Built-in package manager plugins
mod pip;
mod pipenv;

pub use pip::{
    Pip, PipFactory, OPTION_OVERRIDE_PROJECT_DEFINITION_FILE, OPTION_OVERRIDE_PROJECT_TYPE,
};
pub use pipenv::{Pipenv, PipenvCommand, PipenvFactory};
