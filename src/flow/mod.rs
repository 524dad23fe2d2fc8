pub(crate) mod contribution;
