mod test_buffers;
mod test_shader;
