mod fixed_buffer;

pub(crate) use fixed_buffer::FixedBuffer;
