use crate::error::MyResult;
use crate::gfx::created;
use bytemuck::Pod;
use windows::Win32::Graphics::Direct3D11::*;

fn create_buffer<T: Pod>(
    device: &ID3D11Device,
    data: &[T],
    bind_flags: D3D11_BIND_FLAG,
    dynamic: bool,
) -> MyResult<ID3D11Buffer> {
    let bytes: &[u8] = bytemuck::cast_slice(data);
    let (usage, cpu_access) = match dynamic {
        true => (D3D11_USAGE_DYNAMIC, D3D11_CPU_ACCESS_WRITE.0 as u32),
        false => (D3D11_USAGE_DEFAULT, 0),
    };
    let desc = D3D11_BUFFER_DESC {
        ByteWidth: bytes.len() as u32,
        Usage: usage,
        BindFlags: bind_flags.0 as u32,
        CPUAccessFlags: cpu_access,
        MiscFlags: 0,
        StructureByteStride: std::mem::size_of::<T>() as u32,
    };
    let initial = D3D11_SUBRESOURCE_DATA {
        pSysMem: bytes.as_ptr() as *const _,
        SysMemPitch: 0,
        SysMemSlicePitch: 0,
    };
    let mut buffer = None;
    unsafe { device.CreateBuffer(&desc, Some(&initial), Some(&mut buffer))? };
    created(buffer, "buffer")
}

pub fn create_vertex_buffer<T: Pod>(device: &ID3D11Device, vertices: &[T]) -> MyResult<ID3D11Buffer> {
    create_buffer(device, vertices, D3D11_BIND_VERTEX_BUFFER, false)
}

pub fn create_index_buffer(device: &ID3D11Device, indices: &[u16]) -> MyResult<ID3D11Buffer> {
    create_buffer(device, indices, D3D11_BIND_INDEX_BUFFER, false)
}

/// Constant buffer holding one `T`. Dynamic buffers can be rewritten with
/// [`update_constant_buffer`].
pub fn create_constant_buffer<T: Pod>(
    device: &ID3D11Device,
    value: &T,
    dynamic: bool,
) -> MyResult<ID3D11Buffer> {
    create_buffer(
        device,
        std::slice::from_ref(value),
        D3D11_BIND_CONSTANT_BUFFER,
        dynamic,
    )
}

pub fn update_constant_buffer<T: Pod>(
    context: &ID3D11DeviceContext,
    buffer: &ID3D11Buffer,
    value: &T,
) -> MyResult<()> {
    let bytes = bytemuck::bytes_of(value);
    let mut mapped = D3D11_MAPPED_SUBRESOURCE::default();
    unsafe {
        context.Map(buffer, 0, D3D11_MAP_WRITE_DISCARD, 0, Some(&mut mapped))?;
        std::ptr::copy_nonoverlapping(bytes.as_ptr(), mapped.pData as *mut u8, bytes.len());
        context.Unmap(buffer, 0);
    }
    Ok(())
}
