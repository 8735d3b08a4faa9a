mod notation;
mod pipeline;
