pub mod desjardins;
