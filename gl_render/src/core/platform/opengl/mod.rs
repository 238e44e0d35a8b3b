pub mod opengl_device;
