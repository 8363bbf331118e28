mod create;
mod lifecycle;
